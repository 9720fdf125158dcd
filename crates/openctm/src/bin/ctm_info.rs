//! Print a JSON summary of an OpenCTM file.
//!
//! Run: `cargo run -p openctm --features tools --bin ctm_info -- <file.ctm>`
//!
//! With `--fetch <name> [base_url]` the mesh is downloaded through
//! [`openctm::Client`] instead of read from disk.

use std::env;
use std::fs;

use openctm::{Client, Mesh, NoCache};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (source, mesh) = match args.as_slice() {
        [flag, name, rest @ ..] if flag == "--fetch" => {
            let mut client = Client::with_cache(NoCache);
            if let Some(base_url) = rest.first() {
                client = client.with_base_url(base_url.as_str());
            }
            (client.model_url(name), client.fetch_mesh(name).await?)
        }
        [path] => {
            let data = fs::read(path)?;
            (path.clone(), openctm::decode(&data)?)
        }
        _ => {
            eprintln!("usage: ctm_info <file.ctm>");
            eprintln!("       ctm_info --fetch <name> [base_url]");
            std::process::exit(2);
        }
    };

    println!("{}", serde_json::to_string_pretty(&summary(&source, &mesh))?);
    Ok(())
}

fn summary(source: &str, mesh: &Mesh) -> serde_json::Value {
    let (min, max) = bounds(mesh);
    serde_json::json!({
        "source": source,
        "comment": mesh.comment,
        "vertex_count": mesh.vertex_count(),
        "triangle_count": mesh.triangle_count(),
        "has_normals": mesh.normals.is_some(),
        "bounds": { "min": min, "max": max },
        "uv_maps": mesh
            .uv_maps
            .iter()
            .map(|m| serde_json::json!({ "name": m.name, "file_name": m.file_name }))
            .collect::<Vec<_>>(),
        "attribute_maps": mesh
            .attribute_maps
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>(),
    })
}

/// Axis-aligned bounds of the vertex positions.
fn bounds(mesh: &Mesh) -> ([f32; 3], [f32; 3]) {
    let mut positions = mesh.positions();
    let Some(first) = positions.next() else {
        return ([0.0; 3], [0.0; 3]);
    };
    let (min, max) = positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
    (min.to_array(), max.to_array())
}
