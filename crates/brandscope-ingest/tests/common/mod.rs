//! Survey workbook fixtures written with `rust_xlsxwriter`.

use rust_xlsxwriter::{Workbook, XlsxError};

const BRAND_COL: u16 = 3;
const FIRST_VALUE_COL: u16 = 4;

/// One brand row: label, metric values, brand-image values.
pub struct BrandRow<'a> {
    pub brand: &'a str,
    pub metrics: Vec<f64>,
    pub images: Vec<f64>,
}

/// One survey sheet in the three-header-row layout.
pub struct SurveySheet<'a> {
    pub name: &'a str,
    pub metric_headers: Vec<&'a str>,
    pub image_items: Vec<&'a str>,
    pub rows: Vec<BrandRow<'a>>,
}

impl SurveySheet<'_> {
    fn write(&self, workbook: &mut Workbook) -> Result<(), XlsxError> {
        let sheet = workbook.add_worksheet();
        sheet.set_name(self.name)?;

        sheet.write_string(0, 0, "調査")?;
        sheet.write_string(2, BRAND_COL, "ブランド")?;

        let mut col = FIRST_VALUE_COL;
        for header in &self.metric_headers {
            sheet.write_string(0, col, "指標")?;
            sheet.write_string(2, col, *header)?;
            col += 1;
        }
        let image_start = col;
        for item in &self.image_items {
            sheet.write_string(1, col, "ブランドイメージ")?;
            sheet.write_string(2, col, *item)?;
            col += 1;
        }

        for (offset, row) in self.rows.iter().enumerate() {
            let r = 3 + u32::try_from(offset).expect("fixture row fits u32");
            sheet.write_string(r, BRAND_COL, row.brand)?;
            for (i, value) in row.metrics.iter().enumerate() {
                let c = FIRST_VALUE_COL + u16::try_from(i).expect("fixture col fits u16");
                sheet.write_number(r, c, *value)?;
            }
            for (i, value) in row.images.iter().enumerate() {
                let c = image_start + u16::try_from(i).expect("fixture col fits u16");
                sheet.write_number(r, c, *value)?;
            }
        }
        Ok(())
    }
}

/// A sheet with text in the first two rows only, which the parser rejects.
fn write_notes_sheet(workbook: &mut Workbook, name: &str) -> Result<(), XlsxError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;
    sheet.write_string(0, 0, "注記")?;
    sheet.write_string(1, 0, "この調査は社内向けです")?;
    Ok(())
}

pub fn workbook_bytes(sheets: &[SurveySheet<'_>]) -> Vec<u8> {
    workbook_with_notes(&[], sheets)
}

/// Notes sheets first, then survey sheets, in the given order.
pub fn workbook_with_notes(notes: &[&str], sheets: &[SurveySheet<'_>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    for name in notes {
        write_notes_sheet(&mut workbook, name).expect("notes sheet should write");
    }
    for sheet in sheets {
        sheet.write(&mut workbook).expect("fixture sheet should write");
    }
    workbook.save_to_buffer().expect("fixture workbook should serialize")
}

/// The "Overall" sheet with Acme and Beta used across the ingest tests.
pub fn overall_sheet() -> SurveySheet<'static> {
    SurveySheet {
        name: "Overall",
        metric_headers: vec!["認知あり(TOP2)", "興味あり(TOP2)", "ロイヤリティ"],
        image_items: vec!["楽しい", "誠実な", "あてはまるものはない"],
        rows: vec![
            BrandRow {
                brand: "Acme",
                metrics: vec![40.0, 20.0, 5.0],
                images: vec![12.0, 8.0, 30.0],
            },
            BrandRow {
                brand: "Beta",
                metrics: vec![55.0, 25.0, 7.5],
                images: vec![3.0, 9.0, 40.0],
            },
        ],
    }
}
