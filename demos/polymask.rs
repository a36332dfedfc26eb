//! Very simple tool that accepts GeoJSON polygon as an input and prints its mask
#![deny(warnings)]

use polymask::*;
use std::{
    env,
    fs::File,
    io::{Read, Write},
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

#[derive(Debug)]
struct Args {
    input_file: String,
    options: MaskOptions,
    outline: bool,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args {
            input_file: String::new(),
            options: MaskOptions::default(),
            outline: false,
        };
        let mut positional = 0;
        let mut args = env::args();
        let cmd = args.next().unwrap_or_else(|| "polymask".to_owned());
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "-h" => {
                    positional = 0;
                    break;
                }
                "-l" => {
                    let label: i64 = args.next().ok_or("-l requires argument")?.parse()?;
                    result.options.label = Label::new(label)?;
                }
                "-c" => {
                    let config = args.next().ok_or("-c requires argument")?;
                    result.options = serde_json::from_str(&config)?;
                }
                "-s" => {
                    result.options.parallel = false;
                }
                "-o" => {
                    result.outline = true;
                }
                _ => {
                    positional += 1;
                    match positional {
                        1 => result.input_file = arg,
                        _ => return Err("unexpected positional argment".into()),
                    }
                }
            }
        }
        if positional < 1 {
            eprintln!("Very simple tool that accepts GeoJSON polygon as an input and prints its mask");
            eprintln!("\nUSAGE:");
            eprintln!("    {} [-l <label>] [-c <options>] [-s] [-o] <file.geojson>", cmd);
            eprintln!("\nARGS:");
            eprintln!("    -l <label>         label of the mask pixels 1..=255 (default: 255)");
            eprintln!("    -c <options>       options as JSON, e.g. '{{\"label\": 7}}'");
            eprintln!("    -s                 fill rows sequentially");
            eprintln!("    -o                 print thinned outline instead of the mask");
            eprintln!("    <file.geojson>     GeoJSON feature or geometry ('-' means stdin)");
            std::process::exit(1);
        }
        Ok(result)
    }
}

/// Load geometry from the file
fn geometry_load(path: String) -> Result<Geometry, Error> {
    let mut contents = String::new();
    if path != "-" {
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;
    } else {
        std::io::stdin().read_to_string(&mut contents)?;
    }
    Ok(tracing::debug_span!("[parse]").in_scope(|| contents.parse())?)
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    let geometry = geometry_load(args.input_file)?;
    tracing::debug!(
        "[geometry] kind={} rings={}",
        geometry.kind(),
        geometry.rings().len()
    );

    let builder = MaskBuilder::new(args.options);
    tracing::debug!("[builder] {:?}", builder);
    let result = builder.build(&geometry)?;
    let raster = if args.outline {
        &result.outline
    } else {
        &result.mask
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{:?} label={}", result.bbox, builder.options().label)?;
    stdout.write_all(raster.to_ascii().as_bytes())?;
    Ok(())
}
