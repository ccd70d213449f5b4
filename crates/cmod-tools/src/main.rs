//! `cmod2obj`: converts a Celestia CMOD model to a Wavefront OBJ/MTL pair.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use cmod_core::{ConsoleSink, Result};
use cmod_io::{read_cmod, WavefrontWriter};
use cmod_wavefront::WavefrontMesh;

#[derive(Parser, Debug)]
#[command(
    name = "cmod2obj",
    version,
    about = "Convert Celestia cmod files into Wavefront obj/mtl format"
)]
struct Args {
    /// The input cmod file
    input_file: PathBuf,

    /// The output obj file (defaults to input-file.obj)
    #[arg(long)]
    output_file: Option<PathBuf>,

    /// The output mtl file (defaults to output-file.mtl)
    #[arg(long)]
    output_mtl: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Failed to read CMOD: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let obj_path = args.output_file.clone().unwrap_or_else(|| {
        args.output_mtl
            .as_deref()
            .unwrap_or(args.input_file.as_path())
            .with_extension("obj")
    });
    let mtl_path = args
        .output_mtl
        .clone()
        .unwrap_or_else(|| obj_path.with_extension("mtl"));
    let mtl_reference = relative_to(&mtl_path, obj_path.parent());

    let model = read_cmod(File::open(&args.input_file)?)?;

    let mut sink = ConsoleSink;
    let writer = WavefrontWriter::new(WavefrontMesh::create(model, &mut sink));

    let mut obj = BufWriter::new(File::create(&obj_path)?);
    writer.write_obj(&mut obj, &mtl_reference)?;
    obj.flush()?;

    let mut mtl = BufWriter::new(File::create(&mtl_path)?);
    writer.write_mtl(&mut mtl, &mut sink)?;
    mtl.flush()?;

    println!("Wrote obj: {}", obj_path.display());
    println!("Wrote mtl: {}", mtl_path.display());
    Ok(())
}

/// The path recorded in `mtllib`, relative to the OBJ's directory when the
/// MTL lives under it.
fn relative_to(path: &Path, base: Option<&Path>) -> String {
    match base {
        Some(base) if !base.as_os_str().is_empty() => path
            .strip_prefix(base)
            .unwrap_or(path)
            .display()
            .to_string(),
        _ => path.display().to_string(),
    }
}
