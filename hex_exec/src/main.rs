//! Hexapod kinematics executable entry point.
//!
//! Computes the points of a virtual hexapod for one set of measurements and
//! one pose, then:
//!
//!     - Prints the hexapod as JSON on stdout, for a renderer to consume
//!     - Saves the same JSON into the session directory
//!
//! Measurements and the default pose come from `params/hex_exec.toml` and may
//! be overridden on the command line.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use hex_if::pose::parse_measurements;
use log::{debug, info, warn};
use structopt::StructOpt;

// Internal
use hex_lib::{
    kinematics::{selector_names, PoseSelector},
    pose_ctrl::{InputData, Params, PoseCtrl, PoseInput},
};
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Compute the points of a virtual hexapod.
#[derive(Debug, StructOpt)]
#[structopt(name = "hex_exec")]
struct Opts {
    /// Parameter file, relative to the params directory.
    #[structopt(long, default_value = "hex_exec.toml")]
    params: String,

    /// Body and leg measurements as JSON, e.g.
    /// '{"front": 100, "side": 100, "middle": 100, "coxia": 50, "femur": 80, "tibia": 120}'.
    /// Missing fields are zero.
    #[structopt(long)]
    measurements: Option<String>,

    /// Custom pose as JSON, keyed by leg name or index, e.g.
    /// '{"right-front": {"coxia": 10, "femur": 20, "tibia": -30}}'. Missing legs are neutral.
    #[structopt(long, conflicts_with = "uniform")]
    pose: Option<String>,

    /// Custom pose with the same coxia, femur and tibia angles (degrees) on every leg.
    #[structopt(long, number_of_values = 3, allow_hyphen_values = true)]
    uniform: Option<Vec<f64>>,

    /// Predefined pose, overriding any custom pose. `NONE` selects the custom pose.
    #[structopt(long)]
    predefined: Option<PoseSelector>,

    /// List the predefined pose names and exit.
    #[structopt(long)]
    list_poses: bool,

    /// Don't create a session directory, logging to stderr only.
    #[structopt(long)]
    no_session: bool,

    /// Minimum log level, `info` or more verbose.
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    if opts.list_poses {
        for name in selector_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    // ---- EARLY INITIALISATION ----

    let session = if opts.no_session {
        None
    } else {
        Some(Session::new("hex_exec", "sessions").wrap_err("Failed to create the session")?)
    };

    logger_init(opts.log_level, session.as_ref()).wrap_err("Failed to initialise logging")?;

    info!("Hexapod Kinematics Executable\n");
    match session {
        Some(ref s) => info!("Session directory: {:?}\n", s.session_root),
        None => info!("Running without a session\n"),
    }
    debug!("CLI options: {:?}", opts);

    // ---- LOAD PARAMETERS ----

    let params: Params = util::params::load(&opts.params)
        .wrap_err_with(|| format!("Could not load params from {}", opts.params))?;

    info!("Exec parameters loaded");

    // ---- INITIALISE MODULES ----

    let mut pose_ctrl = PoseCtrl::default();
    pose_ctrl
        .init(params, session.as_ref())
        .wrap_err("Failed to initialise PoseCtrl")?;

    // ---- BUILD INPUT ----

    let measurements = match opts.measurements {
        Some(ref json) => {
            Some(parse_measurements(json).wrap_err("Could not parse the measurements")?)
        }
        None => None,
    };

    let custom_pose = match (&opts.pose, &opts.uniform) {
        (Some(json), _) => Some(PoseInput::Json(json.clone())),
        (None, Some(angles)) => PoseInput::uniform_from_slice(angles),
        (None, None) => None,
    };

    let input = InputData {
        measurements,
        selector: opts.predefined,
        custom_pose,
    };

    // ---- PROCESS ----

    let (hexapod, report) = pose_ctrl
        .proc(&input)
        .wrap_err("Failed to compute the hexapod")?;

    if report.predefined_active && input.custom_pose.is_some() {
        warn!("A predefined pose is active, the custom pose was ignored");
    }
    if report.pose_parse_failed {
        warn!("The custom pose could not be parsed, all legs are neutral");
    }
    info!("PoseCtrl status: {:?}", report);

    for leg in hexapod.legs().iter() {
        info!(
            "{:>12}: tip at [{:8.3}, {:8.3}, {:8.3}]",
            leg.name.name(),
            leg.tip.x,
            leg.tip.y,
            leg.tip.z
        );
    }

    // ---- OUTPUT ----

    if let Some(ref s) = session {
        let path = s
            .save_json(session::timestamped_path("hexapod.json"), &hexapod)
            .wrap_err("Failed to save the hexapod to the session")?;
        info!("Hexapod saved to {:?}", path);
    }

    let json = serde_json::to_string_pretty(&hexapod)
        .wrap_err("Failed to serialise the hexapod")?;
    println!("{}", json);

    info!("End of execution");

    Ok(())
}
