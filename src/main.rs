use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_t, App, Arg, ArgMatches,
};
use gsim::{
    data::{read_edge_list, read_sqlite, DataGraph},
    engine::EngineConfig,
    front_end::compile,
    pattern::PatternGraph,
    simulation::{MatchResult, Seeding},
    task::{Config, Task},
    types::VLabel,
};
use log::info;
use std::{
    error::Error,
    fs::File,
    io::{BufWriter, Write},
};

fn load_data_graph(matches: &ArgMatches) -> Result<DataGraph, Box<dyn Error>> {
    let path = matches.value_of("DATAGRAPH").unwrap();
    Ok(if matches.is_present("sqlite") {
        read_sqlite(&rusqlite::Connection::open(path)?)?
    } else {
        read_edge_list(path)?
    })
}

fn load_pattern(matches: &ArgMatches, seeding: &Seeding) -> Result<PatternGraph, Box<dyn Error>> {
    if let Some(path) = matches.value_of("pattern") {
        return compile(&std::fs::read_to_string(path)?);
    }
    let num_vertices = value_t!(matches, "clique", usize)?;
    let labels = match *seeding {
        Seeding::Random { num_labels, .. } => Seeding::Random {
            num_labels,
            seed: value_t!(matches, "pattern-seed", u64)?,
        },
        Seeding::Preset => Seeding::Preset,
    };
    Ok(PatternGraph::clique(num_vertices, |id| labels.vlabel(id, 0))?)
}

fn parse_config(matches: &ArgMatches) -> Result<Config, Box<dyn Error>> {
    Ok(Config {
        engine: EngineConfig {
            niters: value_t!(matches, "niters", usize)?,
            scheduler: matches.is_present("scheduler"),
            windows: value_t!(matches, "windows", usize)?,
            parallel: !matches.is_present("sequential"),
        },
        seeding: Seeding::from_alphabet(
            value_t!(matches, "labels", VLabel)?,
            value_t!(matches, "seed", u64)?,
        )?,
    })
}

fn write_result(matches: &ArgMatches, result: &MatchResult) -> std::io::Result<()> {
    match matches.value_of("output") {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write!(writer, "{}", result)?;
            writer.flush()
        }
        None => {
            print!("{}", result);
            Ok(())
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(Arg::with_name("DATAGRAPH").required(true))
        .arg(
            Arg::with_name("sqlite")
                .help("Reads DATAGRAPH as a SQLite3 database instead of an edge list")
                .long("sqlite")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("pattern")
                .help("Reads the pattern graph from this file")
                .long("pattern")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("clique")
                .help("Matches a clique of this many pattern vertices when no pattern file is given")
                .long("clique")
                .takes_value(true)
                .default_value("5"),
        )
        .arg(
            Arg::with_name("pattern-seed")
                .help("Seeds the labels of the clique pattern")
                .long("pattern-seed")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::with_name("labels")
                .help("Relabels the data graph with this many random labels, 0 keeps its labels")
                .long("labels")
                .takes_value(true)
                .default_value("5"),
        )
        .arg(
            Arg::with_name("seed")
                .help("Seeds the random labels of the data graph")
                .long("seed")
                .takes_value(true)
                .default_value("0"),
        )
        .arg(
            Arg::with_name("niters")
                .help("Maximum number of iterations")
                .long("niters")
                .takes_value(true)
                .default_value("1000"),
        )
        .arg(
            Arg::with_name("scheduler")
                .help("Only updates the vertices whose neighborhood changed")
                .long("scheduler")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("windows")
                .help("Splits the vertex ids into this many windows")
                .long("windows")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::with_name("sequential")
                .help("Updates the vertices one at a time")
                .long("sequential")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("output")
                .help("Writes the candidate sets to this file instead of stdout")
                .long("output")
                .short("o")
                .takes_value(true),
        )
        .get_matches();
    let config = parse_config(&matches)?;
    let data_graph = load_data_graph(&matches)?;
    let pattern_graph = load_pattern(&matches, &config.seeding)?;
    info!("pattern graph:\n{}", pattern_graph);
    let result = Task::new(&data_graph, &pattern_graph, config).run()?;
    write_result(&matches, &result)?;
    Ok(())
}
