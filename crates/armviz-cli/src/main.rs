//! armviz CLI - inspect and pose robot arm joint chains
//!
//! Loads a robot description or chain definition, applies joint angles and
//! prints the resulting link poses, or drives the viewer headlessly.

use anyhow::{Context, Result};
use armviz_control::CodeSync;
use armviz_kinematics::{compute_transforms, end_effector};
use armviz_model::{ChainDefinition, JointChain};
use armviz_viewer::{
    Frame, FrameContent, ModelSource, Surface, SurfaceError, Viewer, ViewerConfig, ViewerHandle,
    ViewerStatus,
};
use clap::{Parser, Subcommand};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tokio::task::LocalSet;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "armviz")]
#[command(about = "Inspect and pose robot arm joint chains", long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the joints of a model file
    Info {
        /// Robot description (.urdf/.xml) or chain definition (.json)
        file: PathBuf,
    },
    /// Print link poses for a set of joint angles
    Pose {
        /// Robot description (.urdf/.xml) or chain definition (.json)
        file: PathBuf,
        /// Joint angle in degrees, e.g. `--set elbow_joint=45`
        #[arg(long = "set", value_parser = parse_assignment)]
        set: Vec<(String, f64)>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run the viewer headlessly, logging each frame
    Run {
        /// Model file (default: the built-in reference arm)
        file: Option<PathBuf>,
        /// Viewer settings (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Stop after this many frames (default: run until Ctrl-C)
        #[arg(short, long)]
        frames: Option<u64>,
        /// Slider input in degrees applied once the model is loaded
        #[arg(long = "set", value_parser = parse_assignment)]
        set: Vec<(String, f64)>,
    },
    /// Print the built-in reference arm as JSON
    Reference,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info { file } => show_info(&file)?,
        Commands::Pose { file, set, json } => show_pose(&file, &set, json)?,
        Commands::Run {
            file,
            config,
            frames,
            set,
        } => run_viewer(file, config, frames, set)?,
        Commands::Reference => println!("{}", ChainDefinition::reference_arm().to_json()?),
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Parse `name=degrees`.
fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=DEGREES, got `{s}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing joint name in `{s}`"));
    }
    let degrees: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid angle `{}` for {name}", value.trim()))?;
    Ok((name.to_string(), degrees))
}

fn load_definition(path: &Path) -> Result<ChainDefinition> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime
        .block_on(ModelSource::from_path(path).load())
        .with_context(|| format!("failed to load {}", path.display()))
}

fn load_chain(path: &Path) -> Result<JointChain> {
    let def = load_definition(path)?;
    JointChain::initialize(def).with_context(|| format!("invalid model in {}", path.display()))
}

fn show_info(path: &Path) -> Result<()> {
    let chain = load_chain(path)?;

    println!("File: {}", path.display());
    println!("Model: {}", chain.name().unwrap_or("(unnamed)"));
    println!("Joints: {}", chain.len());
    println!();
    for joint in chain.joints() {
        let offset = joint.offset();
        println!(
            "  {:<16} {:<10} axis {}  [{:>7.1}°, {:>7.1}°]  offset ({:.3}, {:.3}, {:.3})",
            joint.name(),
            joint.kind().to_string(),
            joint.axis().to_string(),
            joint.min().to_degrees(),
            joint.max().to_degrees(),
            offset.x,
            offset.y,
            offset.z
        );
    }

    let tip = end_effector(&chain).translation_vector();
    println!();
    println!("Rest end effector: ({:.3}, {:.3}, {:.3})", tip.x, tip.y, tip.z);

    Ok(())
}

fn apply_assignments(chain: &mut JointChain, set: &[(String, f64)]) -> Result<()> {
    for (name, degrees) in set {
        let stored = chain.set_angle(name, degrees.to_radians())?;
        if (stored - degrees.to_radians()).abs() > 1e-12 {
            warn!(joint = %name, requested = degrees, applied = stored.to_degrees(), "angle clamped to joint limits");
        }
    }
    Ok(())
}

fn show_pose(path: &Path, set: &[(String, f64)], json: bool) -> Result<()> {
    let mut chain = load_chain(path)?;
    apply_assignments(&mut chain, set)?;
    let transforms = compute_transforms(&chain);

    if json {
        let poses: Vec<_> = transforms.iter().map(|t| t.pose()).collect();
        println!("{}", serde_json::to_string_pretty(&poses)?);
        return Ok(());
    }

    println!("{:<16} {:>8}  {:>8} {:>8} {:>8}", "joint", "angle°", "x", "y", "z");
    for (joint, link) in chain.joints().iter().zip(&transforms) {
        let p = link.origin();
        println!(
            "{:<16} {:>8.1}  {:>8.4} {:>8.4} {:>8.4}",
            joint.name(),
            joint.angle().to_degrees(),
            p.x,
            p.y,
            p.z
        );
    }

    Ok(())
}

/// Surface that logs frames instead of drawing them.
struct LogSurface;

impl Surface for LogSurface {
    fn draw(&mut self, frame: &Frame) -> Result<(), SurfaceError> {
        match &frame.content {
            FrameContent::Loading => debug!(frame = frame.index, "loading"),
            FrameContent::Placeholder { reason, .. } => {
                debug!(frame = frame.index, %reason, "placeholder")
            }
            FrameContent::Arm(visuals) => {
                if let Some(last) = visuals.last() {
                    let tip = last.pose.translation_vector();
                    debug!(
                        frame = frame.index,
                        links = visuals.len(),
                        tip_x = tip.x,
                        tip_y = tip.y,
                        tip_z = tip.z,
                        "arm"
                    );
                }
            }
        }
        Ok(())
    }

    fn release(&mut self) {
        debug!("log surface released");
    }
}

fn run_viewer(
    file: Option<PathBuf>,
    config: Option<PathBuf>,
    frames: Option<u64>,
    set: Vec<(String, f64)>,
) -> Result<()> {
    let config = match config {
        Some(path) => ViewerConfig::load(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    let source = file.map_or(ModelSource::Reference, ModelSource::from_path);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = LocalSet::new();
    local.block_on(&runtime, async move {
        let period = config.frame_period();
        let viewer = Viewer::mount_source(LogSurface, config, source);
        let sync = Rc::new(RefCell::new(CodeSync::reference_arm()));
        viewer.subscribe(Rc::clone(&sync));

        while viewer.is_loading() {
            tokio::time::sleep(period).await;
        }
        if let ViewerStatus::Placeholder { reason } = viewer.status() {
            warn!(%reason, "showing placeholder");
        }

        for (name, degrees) in &set {
            if viewer.slider_input(name, *degrees).is_none() {
                warn!(joint = %name, "slider input ignored");
            }
        }

        match frames {
            Some(n) => {
                while viewer.frames_drawn() < n {
                    tokio::time::sleep(period).await;
                }
            }
            None => {
                info!("running; press Ctrl-C to stop");
                tokio::signal::ctrl_c().await?;
            }
        }

        report(&viewer, &sync.borrow());
        viewer.unmount();
        Ok::<_, anyhow::Error>(())
    })?;

    Ok(())
}

fn report(viewer: &ViewerHandle, sync: &CodeSync) {
    println!("Frames drawn: {}", viewer.frames_drawn());
    if let Some(angles) = viewer.angles() {
        for (name, radians) in angles {
            println!("  {:<16} {:>8.1}°", name, radians.to_degrees());
        }
    }
    if let Some(tip) = viewer
        .transforms()
        .and_then(|t| t.last().map(|link| link.origin()))
    {
        println!("End effector: ({:.3}, {:.3}, {:.3})", tip.x, tip.y, tip.z);
    }
    if let Some(snippet) = sync.active_snippet() {
        println!();
        println!("{snippet}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("elbow_joint=45").unwrap(),
            ("elbow_joint".to_string(), 45.0)
        );
        assert_eq!(
            parse_assignment(" base_joint = -90.5 ").unwrap(),
            ("base_joint".to_string(), -90.5)
        );
        assert!(parse_assignment("elbow_joint").is_err());
        assert!(parse_assignment("=10").is_err());
        assert!(parse_assignment("elbow_joint=fast").is_err());
    }

    #[test]
    fn test_apply_assignments_clamps() {
        let mut chain = JointChain::initialize(ChainDefinition::reference_arm()).unwrap();
        apply_assignments(&mut chain, &[("elbow_joint".to_string(), 180.0)]).unwrap();
        assert_eq!(chain.get_angle("elbow_joint").unwrap(), 2.35);
        assert!(apply_assignments(&mut chain, &[("gripper".to_string(), 1.0)]).is_err());
    }

    #[test]
    fn test_cli_parses_run() {
        let cli = Cli::try_parse_from([
            "armviz", "run", "arm.urdf", "--frames", "5", "--set", "elbow_joint=30",
        ])
        .unwrap();
        match cli.command {
            Commands::Run { file, frames, set, .. } => {
                assert_eq!(file, Some(PathBuf::from("arm.urdf")));
                assert_eq!(frames, Some(5));
                assert_eq!(set, vec![("elbow_joint".to_string(), 30.0)]);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_load_json_definition() {
        let path = std::env::temp_dir().join(format!("armviz-cli-{}.json", std::process::id()));
        std::fs::write(&path, ChainDefinition::reference_arm().to_json().unwrap()).unwrap();
        let chain = load_chain(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(chain.len(), 4);
    }
}
