//! `wasteroom`: inspect and edit waste room layout snapshots from the shell.
//!
//! Every command reads a pixel-space snapshot file, and editing commands print
//! the updated snapshot to stdout so they can be chained. Logs go to stderr.


use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use roomplan::door::Wall;
use roomplan::geometry::{Point, meters_to_pixels};
use roomplan::placed::{ContainerDto, EntityRef};
use roomplan::room::Corner;
use roomplan::{ErrorCode, Layout, PlanError, Violation, snapshot};
use serde::Serialize;
use tracing::{Level, info, warn};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} [{code}]", code = .0.error_code())]
    Plan(#[from] PlanError),
    #[error("cannot encode output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid corner {0}; expected 0 (top-left) to 3 (bottom-left)")]
    InvalidCorner(usize),
    #[error("no door, container or other object with id {0}")]
    UnknownEntity(Uuid),
    #[error("layout has {0} violation(s)")]
    Violations(usize),
}

#[derive(Parser, Debug)]
#[command(name = "wasteroom", about = "Waste room layout checker and editor")]
struct Cli {
    /// Pretty-print JSON output.
    #[arg(long, global = true, env = "WASTEROOM_PRETTY")]
    pretty: bool,

    /// Raise the stderr log level (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report entities outside the room, off their wall or overlapping a zone.
    Check(LayoutFile),
    /// Print the meter-based save payload.
    Payload(LayoutFile),
    /// Auto-place a new container or other object.
    Place(PlaceArgs),
    /// Drag a room corner to a new position.
    Resize(ResizeArgs),
    /// Add a door at the midpoint of a wall.
    AddDoor(AddDoorArgs),
    /// Rotate a container or other object a quarter turn.
    Rotate(EntityArgs),
    /// Remove a door, container or other object.
    Remove(EntityArgs),
}

#[derive(Args, Debug)]
struct LayoutFile {
    /// Layout snapshot (pixel-space JSON).
    #[arg(env = "WASTEROOM_LAYOUT")]
    layout: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ItemKind {
    Container,
    Object,
}

#[derive(Args, Debug)]
struct PlaceArgs {
    #[command(flatten)]
    file: LayoutFile,

    #[arg(long, value_enum)]
    kind: ItemKind,

    #[arg(long)]
    width_mm: f64,

    #[arg(long)]
    depth_mm: f64,

    #[arg(long, default_value = "")]
    name: String,

    /// Catalog id recorded for containers.
    #[arg(long, default_value_t = 0)]
    catalog_id: i64,
}

#[derive(Args, Debug)]
struct ResizeArgs {
    #[command(flatten)]
    file: LayoutFile,

    /// 0 top-left, 1 top-right, 2 bottom-right, 3 bottom-left.
    #[arg(long)]
    corner: usize,

    #[arg(long, allow_negative_numbers = true)]
    x: f64,

    #[arg(long, allow_negative_numbers = true)]
    y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum WallArg {
    Top,
    Bottom,
    Left,
    Right,
}

impl From<WallArg> for Wall {
    fn from(wall: WallArg) -> Self {
        match wall {
            WallArg::Top => Wall::Top,
            WallArg::Bottom => Wall::Bottom,
            WallArg::Left => Wall::Left,
            WallArg::Right => Wall::Right,
        }
    }
}

#[derive(Args, Debug)]
struct AddDoorArgs {
    #[command(flatten)]
    file: LayoutFile,

    #[arg(long, value_enum, default_value = "bottom")]
    wall: WallArg,
}

#[derive(Args, Debug)]
struct EntityArgs {
    #[command(flatten)]
    file: LayoutFile,

    #[arg(long)]
    id: Uuid,
}

#[derive(Serialize, Debug)]
struct CheckReport<'a> {
    ok: bool,
    violations: &'a [Violation],
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let pretty = cli.pretty;

    match cli.command {
        Command::Check(file) => {
            let layout = read_layout(&file)?;
            let violations = layout.violations();
            println!("{}", render(&CheckReport { ok: violations.is_empty(), violations: &violations }, pretty)?);
            if !violations.is_empty() {
                return Err(CliError::Violations(violations.len()));
            }
        }
        Command::Payload(file) => {
            let layout = read_layout(&file)?;
            println!("{}", render(&snapshot::save_payload(&layout), pretty)?);
        }
        Command::Place(args) => {
            let mut layout = read_layout(&args.file)?;
            place(&mut layout, &args)?;
            println!("{}", snapshot::to_json(&layout, pretty)?);
        }
        Command::Resize(args) => {
            let mut layout = read_layout(&args.file)?;
            resize(&mut layout, &args)?;
            println!("{}", snapshot::to_json(&layout, pretty)?);
        }
        Command::AddDoor(args) => {
            let mut layout = read_layout(&args.file)?;
            let entity = layout.add_door(args.wall.into());
            info!(?entity, "door added");
            println!("{}", snapshot::to_json(&layout, pretty)?);
        }
        Command::Rotate(args) => {
            let mut layout = read_layout(&args.file)?;
            let entity = find_entity(&layout, args.id)?;
            let rotation = layout.rotate(entity)?;
            info!(?entity, rotation, "rotated");
            println!("{}", snapshot::to_json(&layout, pretty)?);
        }
        Command::Remove(args) => {
            let mut layout = read_layout(&args.file)?;
            let entity = find_entity(&layout, args.id)?;
            layout.remove(entity)?;
            println!("{}", snapshot::to_json(&layout, pretty)?);
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).init();
}

fn read_layout(file: &LayoutFile) -> Result<Layout, CliError> {
    let raw = fs::read_to_string(&file.layout).map_err(|source| CliError::Read { path: file.layout.clone(), source })?;
    Ok(snapshot::load(&raw)?)
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let out = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    Ok(out)
}

fn place(layout: &mut Layout, args: &PlaceArgs) -> Result<EntityRef, CliError> {
    let entity = match args.kind {
        ItemKind::Container => layout.add_container(ContainerDto {
            id: args.catalog_id,
            name: args.name.clone(),
            width: Some(args.width_mm),
            depth: Some(args.depth_mm),
            ..ContainerDto::default()
        })?,
        ItemKind::Object => {
            let width = meters_to_pixels(args.width_mm / 1000.0);
            let height = meters_to_pixels(args.depth_mm / 1000.0);
            layout.add_other_object(&args.name, width, height)?
        }
    };
    info!(?entity, "placed");
    Ok(entity)
}

fn resize(layout: &mut Layout, args: &ResizeArgs) -> Result<(), CliError> {
    let corner = Corner::from_index(args.corner).ok_or(CliError::InvalidCorner(args.corner))?;
    let stranded = layout.resize_room(corner, Point::new(args.x, args.y));
    info!(room = ?layout.room, "room resized");
    if !stranded.is_empty() {
        warn!(?stranded, "items no longer fit the room");
    }
    Ok(())
}

/// Resolve a bare id to whichever kind of entity carries it.
fn find_entity(layout: &Layout, id: Uuid) -> Result<EntityRef, CliError> {
    [EntityRef::Door(id), EntityRef::Container(id), EntityRef::OtherObject(id)]
        .into_iter()
        .find(|e| layout.entity(*e).is_some())
        .ok_or(CliError::UnknownEntity(id))
}
