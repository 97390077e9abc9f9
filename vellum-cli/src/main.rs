//! Vellum CLI
//!
//! Paints a scene description into a headless host element and prints the
//! resulting native tree.
//!
//! # Usage
//!
//! ```bash
//! # Paint a scene file into a 300x150 host
//! vellum scene.json
//!
//! # Paint inline JSON into a padded 640x480 host
//! vellum --scene-json '{"nodes":[...]}' --host 640x480 --padding 8
//!
//! # Resize the host afterwards and dump the tree as JSON
//! vellum scene.json --resize 800x600 --json
//! ```

mod scene;

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use vellum_common::warning::warn_once;
use vellum_dom::{ClientMetrics, NativeTree, NodeId, print_tree};
use vellum_paint::RetainedPainter;
use vellum_scene::{SceneNodeId, SceneStore};

use crate::scene::{SceneFile, node_to_json, parse_size};

/// Vellum - a retained-mode painter over a native element tree
#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Scene description file to paint
    #[arg(value_name = "SCENE")]
    scene: Option<PathBuf>,

    /// Inline scene JSON instead of a file
    #[arg(long, value_name = "JSON", conflicts_with = "scene")]
    scene_json: Option<String>,

    /// Measured host size
    #[arg(long, value_name = "WxH", default_value = "300x150", value_parser = parse_size)]
    host: (f64, f64),

    /// Padding applied to every side of the host, in pixels
    #[arg(long, value_name = "N", default_value_t = 0)]
    padding: u32,

    /// Re-measure the host at this size after painting
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    resize: Option<(f64, f64)>,

    /// Run a second refresh after removals and resize
    #[arg(long)]
    repaint: bool,

    /// Print the native tree as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = match (&cli.scene, &cli.scene_json) {
        (Some(path), None) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, Some(json)) => json.clone(),
        _ => bail!("either SCENE or --scene-json is required"),
    };
    let scene = SceneFile::parse(&source)?;

    let (tree, host) = build_host(cli.host, cli.padding);
    let store = Rc::new(RefCell::new(SceneStore::new()));
    let mut painter = RetainedPainter::new(tree, host, Rc::clone(&store));

    for spec in scene.nodes {
        let id = spec.id;
        let _ = store
            .borrow_mut()
            .add(spec.into_node())
            .with_context(|| format!("cannot add node {id}"))?;
    }
    painter.refresh().context("first paint failed")?;

    for id in &scene.remove {
        if store.borrow_mut().remove(*id).is_none() {
            warn_once("CLI", &format!("node {id} is not in the scene"));
        }
    }

    if let Some((width, height)) = cli.resize {
        {
            let mut surface = painter.surface_mut();
            let host = surface.host();
            surface.tree_mut().set_client_metrics(
                host,
                ClientMetrics {
                    client_width: width,
                    client_height: height,
                },
            );
        }
        painter.resize();
    }

    if cli.repaint {
        painter.refresh().context("repaint failed")?;
    }

    if cli.json {
        let surface = painter.surface();
        let value = node_to_json(surface.tree(), surface.tree().root());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_summary(&painter, &scene.remove);
    println!();
    println!("{}", "=== Native Tree ===".bold());
    let surface = painter.surface();
    print_tree(surface.tree(), surface.tree().root(), 0);
    Ok(())
}

/// Create a tree holding one measured host element under the document.
fn build_host((width, height): (f64, f64), padding: u32) -> (NativeTree, NodeId) {
    let mut tree = NativeTree::new();
    let host = tree.create_element("div");
    tree.append_child(NodeId::ROOT, host);
    if padding > 0 {
        for side in ["left", "right", "top", "bottom"] {
            tree.set_style(host, &format!("padding-{side}"), &format!("{padding}px"));
        }
    }
    tree.set_client_metrics(
        host,
        ClientMetrics {
            client_width: width,
            client_height: height,
        },
    );
    (tree, host)
}

fn print_summary(painter: &RetainedPainter, removed: &[SceneNodeId]) {
    let store = painter.store().borrow();
    let surface = painter.surface();
    let attached = surface.tree().children(surface.container()).len();

    println!("{}", "=== Surface ===".bold());
    println!(
        "  {} {}x{}",
        "size:".dimmed(),
        painter.width(),
        painter.height()
    );
    println!("  {} {}", "mounted:".dimmed(), surface.is_mounted());
    println!("  {} {}", "scene nodes:".dimmed(), store.len());
    println!("  {} {}", "attached natives:".dimmed(), attached);
    if !removed.is_empty() {
        let ids: Vec<String> = removed.iter().map(ToString::to_string).collect();
        println!("  {} {}", "removed:".dimmed(), ids.join(", ").yellow());
    }
}
