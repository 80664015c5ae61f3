//! Emits the materialized matrix as a Markdown document.

/// Escape a cell so it cannot break the table structure.
fn escape(cell: &str) -> String {
	cell.replace('|', "\\|").replace("\r\n", "<br>").replace(['\n', '\r'], "<br>")
}

/// Render a view title and its rows (header first) as
/// `# <name>\n\n<table>\n`.
pub fn render(view_name: &str, rows: &[Vec<String>]) -> String {
	let mut out = format!("# {view_name}\n\n");
	match rows.first() {
		None => {
			// No columns at all
			out.push_str("|  |\n| --- |\n");
		}
		Some(header) if header.is_empty() => {
			out.push_str("|  |\n| --- |\n");
		}
		Some(header) => {
			let line = |cells: &[String]| {
				let mut line = String::from("|");
				for cell in cells {
					line.push(' ');
					line.push_str(&escape(cell));
					line.push_str(" |");
				}
				line.push('\n');
				line
			};
			out.push_str(&line(header));
			let separator: Vec<String> = header.iter().map(|_| "---".to_string()).collect();
			out.push_str(&line(&separator));
			for row in &rows[1..] {
				out.push_str(&line(row));
			}
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_a_table() {
		let rows = vec![
			vec!["Title".to_string(), "Name".to_string()],
			vec!["Project Alpha".to_string(), "alpha".to_string()],
		];
		let out = render("Main", &rows);
		assert_eq!(out, "# Main\n\n| Title | Name |\n| --- | --- |\n| Project Alpha | alpha |\n");
	}

	#[test]
	fn empty_columns_render_placeholder() {
		assert_eq!(render("Empty", &[]), "# Empty\n\n|  |\n| --- |\n");
	}

	#[test]
	fn cells_are_escaped() {
		let rows = vec![vec!["a".to_string()], vec!["x|y\nz".to_string()]];
		let out = render("V", &rows);
		assert!(out.contains("| x\\|y<br>z |"));
	}
}
