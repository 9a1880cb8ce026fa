//! Command-line entry point: reads an edge-list file, runs the spectral
//! embedding pipeline, and writes `<output_dir>/embedding.txt`.
//!
//! Usage: `speclayout <edges_file> <coarsen: 0|1|2> <hde: 0|1> <refine: 0|1|2|3> <output_dir>`

use argparse::{ArgumentParser, Store};
use speclayout_graph::Graph;
use speclayout_pipeline::{CoarsenMode, HdeMode, PipelineConfig, RefineMode, SpectralError};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::ExitCode;

struct Args {
    edges_file: String,
    coarsen: i64,
    hde: i64,
    refine: i64,
    output_dir: String,
}

fn parse_args() -> Args {
    let mut edges_file = String::new();
    let mut coarsen = 0i64;
    let mut hde = 0i64;
    let mut refine = 0i64;
    let mut output_dir = String::new();
    {
        let mut parser = ArgumentParser::new();
        parser.set_description(
            "Computes a 2D spectral embedding (Fiedler vector and companion) of an undirected graph.",
        );
        parser
            .refer(&mut edges_file)
            .add_argument("edges_file", Store, "path to the edge-list text file")
            .required();
        parser
            .refer(&mut coarsen)
            .add_argument("coarsen", Store, "0: none, 1: coarsen and continue, 2: coarsen and stop")
            .required();
        parser
            .refer(&mut hde)
            .add_argument("hde", Store, "0: off, 1: on")
            .required();
        parser
            .refer(&mut refine)
            .add_argument(
                "refine",
                Store,
                "0: none, 1: Koren, 2: Tutte, 3: Tutte then Koren",
            )
            .required();
        parser
            .refer(&mut output_dir)
            .add_argument("output_dir", Store, "directory embedding.txt is written into")
            .required();
        parser.parse_args_or_exit();
    }
    Args {
        edges_file,
        coarsen,
        hde,
        refine,
        output_dir,
    }
}

/// Reads an edge-list file: one `u v` pair of unsigned integers per
/// nonempty line. Blank lines and lines that don't parse as two unsigned
/// integers are skipped silently (spec.md §6) — this is a file-parsing
/// concern kept out of `speclayout_graph::Graph`, which only ever sees
/// already-valid `u32` pairs.
fn read_edges(path: &str) -> Result<Vec<(u32, u32)>, SpectralError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let mut edges = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        let (Some(u), Some(v), None) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };
        let (Ok(u), Ok(v)) = (u.parse::<u32>(), v.parse::<u32>()) else {
            continue;
        };
        edges.push((u, v));
    }
    Ok(edges)
}

fn write_embedding(
    output_dir: &str,
    embedding: &speclayout_pipeline::Embedding,
) -> Result<(), SpectralError> {
    let dir = Path::new(output_dir);
    let final_path = dir.join("embedding.txt");
    let tmp_path = dir.join("embedding.txt.tmp");

    let mut buf = String::with_capacity(embedding.len() * 24);
    for i in 0..embedding.len() {
        buf.push_str(&embedding.second[i].to_string());
        buf.push(' ');
        buf.push_str(&embedding.third[i].to_string());
        buf.push('\n');
    }

    let mut tmp_file = fs::File::create(&tmp_path)?;
    tmp_file.write_all(buf.as_bytes())?;
    tmp_file.sync_all()?;
    fs::rename(&tmp_path, &final_path)?;
    log::info!("embedding written to {}", final_path.display());
    Ok(())
}

fn run(args: &Args) -> Result<(), SpectralError> {
    let coarsen = CoarsenMode::try_from(u8::try_from(args.coarsen).map_err(|_| {
        SpectralError::Input(format!("coarsen mode must be 0, 1, or 2, got {}", args.coarsen))
    })?)?;
    let hde = HdeMode::try_from(
        u8::try_from(args.hde)
            .map_err(|_| SpectralError::Input(format!("hde flag must be 0 or 1, got {}", args.hde)))?,
    )?;
    let refine = RefineMode::try_from(u8::try_from(args.refine).map_err(|_| {
        SpectralError::Input(format!("refine mode must be 0, 1, 2, or 3, got {}", args.refine))
    })?)?;

    log::info!("reading graph from {}", args.edges_file);
    let edges = read_edges(&args.edges_file)?;
    let graph = Graph::from_edges(edges)?;
    log::info!("graph: {} vertices, {} directed incidences", graph.n(), graph.m());

    let config = PipelineConfig {
        coarsen,
        hde,
        refine,
        ..PipelineConfig::default()
    };
    let embedding = speclayout_pipeline::run(&graph, &config)?;
    write_embedding(&args.output_dir, &embedding)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = parse_args();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
