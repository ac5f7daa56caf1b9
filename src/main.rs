use clap::{App, Arg};
use std::path::Path;
use tagpages::build::build_site;
use tagpages::logging::init_logging;

fn main() {
    let matches = App::new("tagpages")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates the tag index pages of a blog")
        .arg(
            Arg::with_name("source")
                .help("The site directory (or any directory beneath it)")
                .index(1)
                .default_value("."),
        )
        .arg(
            Arg::with_name("destination")
                .short("d")
                .long("destination")
                .takes_value(true)
                .default_value("_site")
                .help("The directory pages would be rendered into"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log every generated page"),
        )
        .get_matches();

    init_logging(if matches.is_present("verbose") {
        "debug"
    } else {
        "info"
    });

    // both arguments have default values
    let source = Path::new(matches.value_of("source").unwrap_or("."));
    let destination = Path::new(matches.value_of("destination").unwrap_or("_site"));

    match build_site(source) {
        Ok(site) => {
            for page in &site.pages {
                let layout = match page.layout() {
                    Some(serde_yaml::Value::String(layout)) => layout,
                    _ => String::new(),
                };
                println!("{}\t{}", page.output_path(destination).display(), layout);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
