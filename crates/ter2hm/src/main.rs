use clap::{arg, command, ArgMatches};
use std::error::Error;
use std::path::Path;
use std::process;

fn main() {
    let matches = command!()
        .about("Converts a Terragen .ter file into a raw32 height map")
        .arg(arg!(-v --verbose ... "Increases verbosity by one level (can be repeated)"))
        .arg(
            arg!(--vmodule <FILTER> "sets the env_logger filter to the given string: \
                                     default,module::path=level,... \
                                     {trace,debug,info,warn,error,none}")
            .required(false),
        )
        .arg(arg!(-a --all "If set, also prints elevation statistics."))
        .arg(
            arg!(-o --output <PATH> "Where to write the raw32 height map")
                .required(false)
                .default_value("out.raw32")
                .allow_invalid_utf8(true),
        )
        .arg(
            arg!(--png <PATH> "Also writes a greyscale preview image")
                .required(false)
                .allow_invalid_utf8(true),
        )
        .arg(arg!([INPUT] "The .ter file to read").required(true).allow_invalid_utf8(true))
        .get_matches();

    // Logging stuff: keep above everything but the cmdline parsing.
    let mut log_builder = env_logger::Builder::new();
    match matches.occurrences_of("verbose") {
        0 => {
            log_builder.filter_level(log::LevelFilter::Warn);
        }
        1 => {
            log_builder.filter_level(log::LevelFilter::Info);
        }
        2 => {
            log_builder.filter_level(log::LevelFilter::Debug);
        }
        _ => {
            log_builder.filter_level(log::LevelFilter::Trace);
        }
    };
    if let Some(filter) = matches.value_of("vmodule") {
        log_builder.parse_filters(filter);
    }
    log_builder.init();

    // Required, so clap has already rejected a missing INPUT.
    let input = Path::new(matches.value_of_os("INPUT").unwrap());
    if let Err(e) = run(input, &matches) {
        eprintln!("Couldn't convert {}: {}", input.display(), e);
        process::exit(1);
    }
}

fn run(input: &Path, matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let terrain = ter::TerrainDescriptor::open(input)?;
    println!("{} read successfully.", input.display());
    if matches.is_present("all") {
        println!("{:+}", &terrain); // Use {:+} for verbose printing.
    } else {
        println!("{}", &terrain);
    }

    let output = Path::new(matches.value_of_os("output").unwrap());
    let count = ter2hm::write_raw32_file(&terrain, output)?;
    println!("Wrote {} heights to {}", count, output.display());

    if let Some(png) = matches.value_of_os("png") {
        ter2hm::export_png(&terrain, png)?;
        println!("Wrote preview to {}", Path::new(png).display());
    }
    Ok(())
}
