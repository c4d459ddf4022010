use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};

use super::schema::{Cell, ReportTable};

const MIN_COLUMN_WIDTH: f64 = 12.0;
const MAX_COLUMN_WIDTH: f64 = 60.0;

/// Single-sheet workbook: heading row, then one row per record in input order.
pub(crate) fn render(table: &ReportTable) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(table.kind.sheet_name())?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x2980B9))
        .set_border(FormatBorder::Thin);

    for (column, heading) in table.headings.iter().enumerate() {
        let column = column as u16;
        worksheet.write_string_with_format(0, column, *heading, &header_format)?;
        worksheet.set_column_width(column, column_width(table, column as usize))?;
    }

    for (index, row) in table.rows.iter().enumerate() {
        let row_number = (index + 1) as u32;
        for (column, cell) in row.iter().enumerate() {
            let column = column as u16;
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row_number, column, text)?;
                }
                Cell::Number(number) => {
                    worksheet.write_number(row_number, column, *number)?;
                }
                Cell::Empty => {}
            }
        }
    }

    workbook.save_to_buffer()
}

fn column_width(table: &ReportTable, column: usize) -> f64 {
    let widest = table
        .rows
        .iter()
        .filter_map(|row| row.get(column))
        .map(|cell| cell.display().chars().count())
        .chain(table.headings.get(column).map(|heading| heading.chars().count()))
        .max()
        .unwrap_or(0);
    (widest as f64 + 2.0).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}
