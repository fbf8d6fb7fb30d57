use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polygon::Polygon;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod json;
mod provenance;

use json::{load_polygon, read_json, to_value, PolygonDoc};
use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "polygon-cli")]
#[command(about = "Inspect and edit polygons described as JSON")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the polygon and its JSON document
    Inspect {
        /// JSON text or path to a JSON file
        #[arg(long)]
        input: String,
    },
    /// Check whether a point is exactly one of the polygon's vertices
    Contains {
        #[arg(long)]
        input: String,
        /// Point as JSON, e.g. "[4, 4]"
        #[arg(long)]
        point: String,
    },
    /// Overwrite one vertex and write the resulting document
    Set {
        #[arg(long)]
        input: String,
        /// Vertex index; negative values count from the end
        #[arg(long, allow_hyphen_values = true)]
        index: isize,
        #[arg(long)]
        point: String,
        #[arg(long)]
        out: String,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Inspect { input } => inspect(input),
        Action::Contains { input, point } => contains(input, point),
        Action::Set {
            input,
            index,
            point,
            out,
        } => set(input, index, point, out),
        Action::Report => report(),
    }
}

fn inspect(input: String) -> Result<()> {
    tracing::info!(input, "inspect");
    let poly = load_polygon(&read_json(&input)?)?;
    println!("{poly}");
    println!(
        "{}",
        serde_json::to_string_pretty(&PolygonDoc::from_polygon(&poly))?
    );
    Ok(())
}

fn contains(input: String, point: String) -> Result<()> {
    tracing::info!(input, point, "contains");
    let poly = load_polygon(&read_json(&input)?)?;
    let hit = poly
        .contains_point(&to_value(&read_json(&point)?))
        .context("point must be a pair of numbers")?;
    println!("{hit}");
    Ok(())
}

fn set(input: String, index: isize, point: String, out: String) -> Result<()> {
    tracing::info!(input, index, point, out, "set");
    let poly = load_polygon(&read_json(&input)?)?;
    let poly = with_vertex(poly, index, &read_json(&point)?)?;
    write_doc(&poly, Path::new(&out))?;
    let prov = write_sidecar(
        &out,
        Payload::new(
            "set",
            serde_json::json!({ "input": input, "index": index, "point": point }),
        ),
    )?;
    tracing::info!(verts_num = poly.len(), provenance = %prov.display(), "wrote polygon");
    Ok(())
}

fn with_vertex(mut poly: Polygon, index: isize, point: &serde_json::Value) -> Result<Polygon> {
    poly.set(index, &to_value(point))
        .with_context(|| format!("assigning vertex {index}"))?;
    Ok(poly)
}

fn write_doc(poly: &Polygon, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let doc = PolygonDoc::from_polygon(poly);
    std::fs::write(out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "polygon_version": polygon::VERSION,
        "cli_version": env!("CARGO_PKG_VERSION"),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
