// Shared fixtures: writes small ESRI shapefiles (and dBase tables) by hand.
#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const SHAPE_NULL: i32 = 0;
pub const SHAPE_POLYLINE: i32 = 3;
pub const SHAPE_POLYGON: i32 = 5;

/// One shape record: a list of parts (rings or line parts), or null.
pub enum Record {
    Null,
    Parts(Vec<Vec<(f64, f64)>>),
}

/// Clockwise rectangle, i.e. an exterior ring in shapefile winding.
pub fn rect(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Vec<(f64, f64)> {
    vec![
        (min_lon, min_lat),
        (min_lon, max_lat),
        (max_lon, max_lat),
        (max_lon, min_lat),
        (min_lon, min_lat),
    ]
}

fn bounds(points: impl Iterator<Item = (f64, f64)>) -> [f64; 4] {
    let mut b = [f64::MAX, f64::MAX, f64::MIN, f64::MIN];
    let mut any = false;
    for (x, y) in points {
        any = true;
        b[0] = b[0].min(x);
        b[1] = b[1].min(y);
        b[2] = b[2].max(x);
        b[3] = b[3].max(y);
    }
    if any {
        b
    } else {
        [0.0; 4]
    }
}

pub fn shp_bytes(shape_type: i32, records: &[Record]) -> Vec<u8> {
    let mut body = Vec::new();
    for (i, record) in records.iter().enumerate() {
        let mut content = Vec::new();
        match record {
            Record::Null => content.extend_from_slice(&SHAPE_NULL.to_le_bytes()),
            Record::Parts(parts) => {
                content.extend_from_slice(&shape_type.to_le_bytes());
                for v in bounds(parts.iter().flatten().copied()) {
                    content.extend_from_slice(&v.to_le_bytes());
                }
                let n_points: usize = parts.iter().map(Vec::len).sum();
                content.extend_from_slice(&(parts.len() as i32).to_le_bytes());
                content.extend_from_slice(&(n_points as i32).to_le_bytes());
                let mut start = 0i32;
                for part in parts {
                    content.extend_from_slice(&start.to_le_bytes());
                    start += part.len() as i32;
                }
                for &(x, y) in parts.iter().flatten() {
                    content.extend_from_slice(&x.to_le_bytes());
                    content.extend_from_slice(&y.to_le_bytes());
                }
            }
        }
        body.extend_from_slice(&((i + 1) as i32).to_be_bytes());
        body.extend_from_slice(&((content.len() / 2) as i32).to_be_bytes());
        body.extend_from_slice(&content);
    }

    let all_points = records.iter().flat_map(|r| match r {
        Record::Null => Vec::new(),
        Record::Parts(parts) => parts.iter().flatten().copied().collect(),
    });

    let mut out = Vec::with_capacity(100 + body.len());
    out.extend_from_slice(&9994i32.to_be_bytes());
    out.extend_from_slice(&[0u8; 20]);
    out.extend_from_slice(&(((100 + body.len()) / 2) as i32).to_be_bytes());
    out.extend_from_slice(&1000i32.to_le_bytes());
    out.extend_from_slice(&shape_type.to_le_bytes());
    for v in bounds(all_points) {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out.extend_from_slice(&[0u8; 32]);
    out.extend_from_slice(&body);
    out
}

/// dBase III table with a single character column.
pub fn dbf_bytes(column: &str, values: &[&str]) -> Vec<u8> {
    const WIDTH: u8 = 20;
    let header_len: u16 = 32 + 32 + 1;
    let record_len: u16 = 1 + WIDTH as u16;

    let mut out = Vec::new();
    out.push(0x03);
    out.extend_from_slice(&[124, 1, 1]);
    out.extend_from_slice(&(values.len() as u32).to_le_bytes());
    out.extend_from_slice(&header_len.to_le_bytes());
    out.extend_from_slice(&record_len.to_le_bytes());
    out.extend_from_slice(&[0u8; 20]);

    let mut name = [0u8; 11];
    name[..column.len()].copy_from_slice(column.as_bytes());
    out.extend_from_slice(&name);
    out.push(b'C');
    out.extend_from_slice(&[0u8; 4]);
    out.push(WIDTH);
    out.push(0);
    out.extend_from_slice(&[0u8; 14]);
    out.push(0x0D);

    for value in values {
        out.push(b' ');
        let mut cell = [b' '; WIDTH as usize];
        cell[..value.len()].copy_from_slice(value.as_bytes());
        out.extend_from_slice(&cell);
    }
    out.push(0x1A);
    out
}

pub fn write_zip(path: &Path, members: &[(&str, &[u8])]) -> PathBuf {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    for (name, bytes) in members {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(bytes).unwrap();
    }
    zip.finish().unwrap();
    path.to_path_buf()
}

/// Five countries: one plain, one two-part, one null, one south-polar,
/// one straddling the antimeridian.
pub fn world_records() -> (Vec<Record>, Vec<&'static str>) {
    let records = vec![
        Record::Parts(vec![rect(5.0, 58.0, 30.0, 71.0)]),
        Record::Parts(vec![rect(-10.0, 36.0, 3.0, 43.0), rect(2.0, 39.0, 4.0, 40.0)]),
        Record::Null,
        Record::Parts(vec![rect(-180.0, -90.0, 180.0, -86.0)]),
        Record::Parts(vec![rect(179.0, 65.0, 181.0, 70.0)]),
    ];
    let names = vec!["Norway", "Spain", "Nowhere", "Antarctica", "Chukotka"];
    (records, names)
}

pub fn write_world_zip(dir: &Path) -> PathBuf {
    let (records, names) = world_records();
    let shp = shp_bytes(SHAPE_POLYGON, &records);
    let dbf = dbf_bytes("NAME", &names);
    write_zip(
        &dir.join("world.zip"),
        &[("world/world.shp", &shp), ("world/world.dbf", &dbf)],
    )
}
