use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PACKAGE_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Two day blocks in the faculty layout: a title row, a spaced-out `D A Y`
/// header, day names only on the first row of each block and a repeated
/// header between blocks.
pub const FACULTY_SHEET: &[&[&str]] = &[
    &["FACULTY OF MEDICINE TIMETABLE", "", "", "", "", ""],
    &[
        "D A Y",
        "NAME OF ROOM",
        "8.00 - 9.00",
        "9.00 - 10.00",
        "10.00 - 11.00",
        "11.00 - 12.00 pm",
    ],
    &[
        "M O N D A Y",
        "LT1",
        "BMC2023 : Dr Tan BMCS Y2S2",
        "BMC2023 : Dr Tan  BMCS Y2S2",
        "",
        "",
    ],
    &["", "LT2", "", "", "BMC2023 : Dr Tan BMCS Y2S2", ""],
    &["", "Seminar Room", "BSS1001 : Mr Lim BSSC Y1S1", "", "", ""],
    &[
        "DAY",
        "NAME OF ROOM",
        "8.00 - 9.00",
        "9.00 - 10.00",
        "10.00 - 11.00",
        "11.00 - 12.00 pm",
    ],
    &[
        "TUESDAY",
        "LT3",
        "",
        "BMC2041 : Dr Ong BMCS Y2S2",
        "BMC2041 : Dr Ong BMCS Y2S2",
        "",
    ],
    &["", "LT4", "", "", "", "BMC2041 : Dr Ong BMCS Y2S2"],
    &["", "LT1", "BSS1001 : Mr Lim BSSC Y1S1", "", "", ""],
    &["WEDNESDAY", "LT1", "", "", "", "BMCS Y2S2 Self study"],
];

pub fn write_sheet_csv(path: &Path, rows: &[&[&str]]) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = WriterBuilder::new().flexible(true).from_path(path)?;
    for row in rows {
        writer.write_record(*row)?;
    }
    writer.flush()?;
    Ok(())
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Numeric-looking cells become number cells, everything else a shared string.
fn worksheet_xml(rows: &[&[&str]], shared: &mut Vec<String>) -> String {
    let mut xml = format!(r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="{MAIN_NS}"><sheetData>"#);
    for (index, row) in rows.iter().enumerate() {
        let number = index + 1;
        xml.push_str(&format!(r#"<row r="{number}">"#));
        for (cell, column) in row.iter().zip(b'A'..=b'Z') {
            if cell.is_empty() {
                continue;
            }
            let reference = format!("{}{number}", char::from(column));
            if cell.parse::<f64>().is_ok() {
                xml.push_str(&format!(r#"<c r="{reference}"><v>{cell}</v></c>"#));
            } else {
                xml.push_str(&format!(r#"<c r="{reference}" t="s"><v>{}</v></c>"#, shared.len()));
                shared.push(escape_xml(cell));
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Writes a minimal xlsx package holding the named sheets in order.
pub fn write_workbook_xlsx(
    path: &Path,
    sheets: &[(&str, &[&[&str]])],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut shared = Vec::new();
    let mut parts = Vec::new();
    let mut sheet_entries = String::new();
    let mut sheet_rels = String::new();
    let mut sheet_types = String::new();

    for (index, (name, rows)) in sheets.iter().enumerate() {
        let number = index + 1;
        parts.push((
            format!("xl/worksheets/sheet{number}.xml"),
            worksheet_xml(rows, &mut shared),
        ));
        sheet_entries.push_str(&format!(
            r#"<sheet name="{}" sheetId="{number}" r:id="rId{number}"/>"#,
            escape_xml(name)
        ));
        sheet_rels.push_str(&format!(
            r#"<Relationship Id="rId{number}" Type="{REL_NS}/worksheet" Target="worksheets/sheet{number}.xml"/>"#
        ));
        sheet_types.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{number}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));
    }

    let strings = shared
        .iter()
        .map(|text| format!(r#"<si><t xml:space="preserve">{text}</t></si>"#))
        .collect::<String>();
    parts.push((
        "xl/sharedStrings.xml".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><sst xmlns="{MAIN_NS}" count="{count}" uniqueCount="{count}">{strings}</sst>"#,
            count = shared.len()
        ),
    ));
    parts.push((
        "xl/workbook.xml".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><workbook xmlns="{MAIN_NS}" xmlns:r="{REL_NS}"><sheets>{sheet_entries}</sheets></workbook>"#
        ),
    ));
    parts.push((
        "xl/_rels/workbook.xml.rels".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="{PACKAGE_REL_NS}">{sheet_rels}<Relationship Id="rIdStrings" Type="{REL_NS}/sharedStrings" Target="sharedStrings.xml"/></Relationships>"#
        ),
    ));
    parts.push((
        "_rels/.rels".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="{PACKAGE_REL_NS}"><Relationship Id="rId1" Type="{REL_NS}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
        ),
    ));
    parts.push((
        "[Content_Types].xml".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>{sheet_types}</Types>"#
        ),
    ));

    let mut zip = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default();
    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }
    zip.finish()?;
    Ok(())
}
