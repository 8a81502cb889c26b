use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::QueryResult;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::data::import::error::ImportError;
use crate::data::models::ShelterRecord;
use crate::data::repo::shelters::{ShelterSink, ShelterStore};
use crate::data::source::delimited::read_csv;
use crate::data::source::Rows;
use crate::geocode::error::ResolutionError;
use crate::geocode::{first_candidate, AddressResolver, Coordinates};

/// Answers lookups from a fixed table of provider responses, given in the
/// provider's `[longitude, latitude]` order. Unknown addresses get an empty
/// feature list.
#[derive(Default)]
pub struct StaticResolver {
    places: HashMap<String, [f64; 2]>,
    pub calls: RefCell<Vec<String>>,
}

impl StaticResolver {
    pub fn with(mut self, address: &str, lon_lat: [f64; 2]) -> StaticResolver {
        self.places.insert(address.to_owned(), lon_lat);
        self
    }
}

impl AddressResolver for StaticResolver {
    fn resolve(&self, address: &str) -> Result<Coordinates, ResolutionError> {
        self.calls.borrow_mut().push(address.to_owned());
        let body = match self.places.get(address) {
            Some([lon, lat]) => format!(
                r#"{{"features":[{{"relevance":1.0,"geometry":{{"type":"Point","coordinates":[{},{}]}}}}]}}"#,
                lon, lat
            ),
            None => r#"{"type":"FeatureCollection","features":[]}"#.to_owned(),
        };
        first_candidate(address, &body, None)
    }
}

/// Keeps committed shelters in memory. Inserts made inside a failed
/// transaction are dropped.
#[derive(Default)]
pub struct MemoryStore {
    pub committed: Vec<ShelterRecord>,
    /// 1-based insert attempt that fails with a constraint violation.
    pub fail_on_insert: Option<usize>,
}

struct MemoryTransaction {
    staged: Vec<ShelterRecord>,
    attempts: usize,
    fail_on_insert: Option<usize>,
}

impl ShelterSink for MemoryTransaction {
    fn insert_shelter(&mut self, shelter: &ShelterRecord) -> QueryResult<()> {
        self.attempts += 1;
        if self.fail_on_insert == Some(self.attempts) {
            return Err(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new(String::from("duplicate key value violates unique constraint")),
            ));
        }
        self.staged.push(shelter.clone());
        Ok(())
    }
}

impl ShelterStore for MemoryStore {
    fn in_transaction<T, F>(&mut self, f: F) -> Result<T, ImportError>
    where
        F: FnOnce(&mut dyn ShelterSink) -> Result<T, ImportError>,
    {
        let mut transaction = MemoryTransaction {
            staged: Vec::new(),
            attempts: 0,
            fail_on_insert: self.fail_on_insert,
        };
        let result = f(&mut transaction);
        if result.is_ok() {
            self.committed.extend(transaction.staged);
        }
        result
    }
}

pub fn csv_rows(content: &str) -> Rows {
    read_csv(Cursor::new(content.as_bytes().to_vec())).expect("Could not read csv rows")
}

pub const HEADER: &str = "district,address,shelter_type,place,building_type,owner,ownership,phone,accessibility,hours";

pub enum SheetCell<'a> {
    Text(&'a str),
    Number(f64),
}

/// Writes a one-sheet xlsx file holding the given cells, keyed by their A1
/// reference and listed in sheet order.
pub fn write_workbook(path: &Path, cells: &[(&str, SheetCell)]) {
    let mut rows: Vec<(String, Vec<String>)> = Vec::new();
    for (reference, cell) in cells {
        let row_number: String = reference.chars().filter(char::is_ascii_digit).collect();
        let xml = match cell {
            SheetCell::Text(text) => format!(
                r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                reference,
                escape_xml(text)
            ),
            SheetCell::Number(number) => format!(r#"<c r="{}"><v>{}</v></c>"#, reference, number),
        };
        match rows.last_mut() {
            Some((number, row_cells)) if *number == row_number => row_cells.push(xml),
            _ => rows.push((row_number, vec![xml])),
        }
    }
    let sheet_data: String = rows
        .iter()
        .map(|(number, row_cells)| format!(r#"<row r="{}">{}</row>"#, number, row_cells.concat()))
        .collect();

    let parts = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#
                .to_owned(),
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
                .to_owned(),
        ),
        (
            "xl/workbook.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Shelters" sheetId="1" r:id="rId1"/></sheets></workbook>"#
                .to_owned(),
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#
                .to_owned(),
        ),
        (
            "xl/worksheets/sheet1.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
                sheet_data
            ),
        ),
    ];

    let file = File::create(path).expect("Could not create workbook");
    let mut archive = ZipWriter::new(file);
    for (name, content) in parts.iter() {
        archive
            .start_file(*name, SimpleFileOptions::default())
            .expect("Could not start workbook part");
        archive
            .write_all(content.as_bytes())
            .expect("Could not write workbook part");
    }
    archive.finish().expect("Could not finish workbook");
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
