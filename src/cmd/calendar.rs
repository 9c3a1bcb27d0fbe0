use crate::calc::{month_grid, month_name, WEEKDAY_HEADER};
use anyhow::Result;

const MONTHS_PER_ROW: usize = 3;
const MONTH_WIDTH: usize = 20;
const GAP: &str = "   ";

pub fn run(year: i32) -> Result<()> {
    write_year(year, &mut std::io::stdout())
}

/// Prints a Monday-first calendar of the whole year, three months per row.
pub(crate) fn write_year<W: std::io::Write>(year: i32, out: &mut W) -> Result<()> {
    let total_width = MONTHS_PER_ROW * MONTH_WIDTH + (MONTHS_PER_ROW - 1) * GAP.len();
    writeln!(out, "{:^width$}", year, width = total_width)?;

    let months: Vec<u32> = (1..=12).collect();
    for group in months.chunks(MONTHS_PER_ROW) {
        writeln!(out)?;
        let titles: Vec<String> = group
            .iter()
            .map(|&m| format!("{:^width$}", month_name(m), width = MONTH_WIDTH))
            .collect();
        writeln!(out, "{}", titles.join(GAP).trim_end())?;
        let headers = vec![WEEKDAY_HEADER; group.len()];
        writeln!(out, "{}", headers.join(GAP))?;

        let grids: Vec<Vec<Option<u32>>> = group.iter().map(|&m| month_grid(year, m)).collect();
        let weeks = grids.iter().map(|g| g.len() / 7).max().unwrap_or(0);
        for week in 0..weeks {
            let line: Vec<String> = grids
                .iter()
                .map(|grid| format_week(grid.get(week * 7..week * 7 + 7)))
                .collect();
            writeln!(out, "{}", line.join(GAP).trim_end())?;
        }
    }
    Ok(())
}

fn format_week(cells: Option<&[Option<u32>]>) -> String {
    match cells {
        Some(cells) => cells
            .iter()
            .map(|c| match c {
                Some(day) => format!("{:>2}", day),
                None => "  ".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" "),
        None => " ".repeat(MONTH_WIDTH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(year: i32) -> String {
        let mut buf = Vec::new();
        write_year(year, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_year_has_title_and_all_months() {
        let out = render(2024);
        assert_eq!(out.lines().next().unwrap().trim(), "2024");
        for month in 1..=12 {
            assert!(out.contains(month_name(month)));
        }
        assert_eq!(out.matches(WEEKDAY_HEADER).count(), 12);
    }

    #[test]
    fn test_write_year_sunday_first_is_in_last_column() {
        // September 2024 starts on a Sunday; it is the last month of its row
        let out = render(2024);
        let lines: Vec<&str> = out.lines().collect();
        let title = lines.iter().position(|l| l.contains("September")).unwrap();
        let first_week = lines[title + 2];
        let september_col = 2 * (MONTH_WIDTH + GAP.len());
        assert_eq!(first_week.len(), september_col + MONTH_WIDTH);
        assert_eq!(&first_week[september_col..], format!("{}1", " ".repeat(19)));
    }

    #[test]
    fn test_write_year_leap_day() {
        let leap = render(2024);
        let common = render(2023);
        assert!(leap.contains("26 27 28 29"));
        assert_eq!(leap.matches("29").count(), 12);
        assert_eq!(common.matches("29").count(), 11);
    }

    #[test]
    fn test_format_week_blank_padding() {
        assert_eq!(format_week(None), " ".repeat(MONTH_WIDTH));
        let week = [None, None, Some(1), Some(2), Some(3), Some(4), Some(5)];
        assert_eq!(format_week(Some(&week[..])), "       1  2  3  4  5");
    }
}
