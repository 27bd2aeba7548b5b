/// Roundtrip diagnostic: import a CAD-JSON file, save it in both record
/// encodings, read each back and compare.
///
/// Usage: cadshape-roundtrip [-v] <file.json>

use cadshape::canvas::CountingCanvas;
use cadshape::{CadJsonImporter, Drawing, ImportConfiguration, RecordFormat, Shape};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut verbose = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            _ => path = Some(arg),
        }
    }

    tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_target(false)
        .init();

    let Some(path) = path else {
        eprintln!("usage: cadshape-roundtrip [-v] <file.json>");
        return ExitCode::from(2);
    };

    match run(&path) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> cadshape::Result<bool> {
    // 1. Import
    let text = std::fs::read_to_string(path)?;
    let importer = CadJsonImporter::new(ImportConfiguration {
        failsafe: true,
        ..Default::default()
    });
    let drawing = importer.import_str(&text)?;

    println!("1. Imported {}", path);
    println!(
        "   {} shapes, {} layers, {} line types, {} notifications",
        drawing.shape_count(),
        drawing.layers.len(),
        drawing.line_types.len(),
        drawing.notifications.len()
    );
    for notification in &drawing.notifications {
        println!("   {}", notification);
    }
    match drawing.bounding_rect() {
        Some(rect) => println!("   bounds: {} .. {}", rect.min, rect.max),
        None => println!("   bounds: none"),
    }
    let mut canvas = CountingCanvas::default();
    drawing.draw(&mut canvas);
    println!(
        "   {} primitives ({} invisible) in {} blocks",
        canvas.primitives, canvas.invisible, canvas.blocks
    );
    for (i, shape) in drawing.shapes().iter().enumerate() {
        println!("   [{}] {}", i, shape);
    }

    // 2. Save and reload in each encoding
    let mut all_equal = true;
    for (step, format) in [(2, RecordFormat::Binary), (3, RecordFormat::Text)] {
        let mut record = Vec::new();
        drawing.save(&mut record, format)?;
        let reloaded = Drawing::load(record.as_slice(), format)?;
        let equal = reloaded == drawing;
        all_equal &= equal;
        println!(
            "{}. {:?} record: {} bytes, reloaded {} shapes, {}",
            step,
            format,
            record.len(),
            reloaded.shape_count(),
            if equal { "equal" } else { "DIFFERENT" }
        );
    }

    Ok(all_equal)
}
