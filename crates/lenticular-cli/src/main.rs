use std::{error::Error, fmt::Write as _, fs, path::Path};

use clap::{Parser, Subcommand};
use lenticular_core::{lens_stripes, CalibrationConfig, Mat4};
use lenticular_pipeline::{compute_projection, CalibrationState, ShaderUniforms};
use log::debug;

/// Calibration CLI for lenticular (autostereoscopic) displays.
#[derive(Debug, Parser)]
#[command(author, version, about = "Lenticular display calibration")]
struct Args {
    /// Path to JSON file containing a CalibrationConfig. Defaults are used if omitted.
    #[arg(long, global = true)]
    config: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the SCREEN / LENTICULAR / LIGHTFIELD report.
    Report,
    /// Print the pixel-column to (lens, view) table.
    ViewMap {
        /// Skip columns outside the addressable lenses.
        #[arg(long)]
        valid_only: bool,
    },
    /// Print the off-axis projection for the configured viewpoint.
    Projection,
    /// Print the uniform bundle for the interlacing shaders.
    Uniforms,
    /// Print the lens-pitch test pattern stripes.
    Stripes,
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let data = fs::read_to_string(path)?;
    let value = serde_json::from_str(&data)?;
    Ok(value)
}

fn load_config(path: Option<&str>) -> Result<CalibrationConfig, Box<dyn Error>> {
    match path {
        Some(p) => load_json_file(Path::new(p)),
        None => Ok(CalibrationConfig::default()),
    }
}

fn format_matrix(out: &mut String, m: &Mat4) -> Result<(), Box<dyn Error>> {
    for r in 0..4 {
        writeln!(
            out,
            "[{:>12.6} {:>12.6} {:>12.6} {:>12.6}]",
            m[(r, 0)],
            m[(r, 1)],
            m[(r, 2)],
            m[(r, 3)]
        )?;
    }
    Ok(())
}

fn render(
    command: &Command,
    config: &CalibrationConfig,
    json: bool,
) -> Result<String, Box<dyn Error>> {
    let state = CalibrationState::new(*config)?;
    let mut out = String::new();

    match command {
        Command::Report => {
            if json {
                out = serde_json::to_string_pretty(&state.report())?;
            } else {
                out = state.report().to_string();
            }
        }
        Command::ViewMap { valid_only } => {
            let entries: Vec<_> = state
                .snapshot()
                .view_map
                .iter()
                .filter(|e| !valid_only || e.valid)
                .collect();
            if json {
                out = serde_json::to_string_pretty(&entries)?;
            } else {
                writeln!(out, "column lens view valid")?;
                for e in entries {
                    let valid = u8::from(e.valid);
                    writeln!(out, "{} {} {} {}", e.column, e.lens, e.view, valid)?;
                }
            }
        }
        Command::Projection => {
            let projection = compute_projection(config, state.snapshot())?;
            if json {
                out = serde_json::to_string_pretty(&projection)?;
            } else {
                let f = &projection.frustum;
                let eye = &projection.eye;
                writeln!(out, "eye: {}, {}, {}", eye.x, eye.y, eye.z)?;
                writeln!(out, "distance: {:.6}", projection.distance)?;
                writeln!(
                    out,
                    "frustum (l, r, b, t, n, f): {:.6}, {:.6}, {:.6}, {:.6}, {}, {}",
                    f.left, f.right, f.bottom, f.top, f.near, f.far
                )?;
                format_matrix(&mut out, &projection.matrix)?;
            }
        }
        Command::Uniforms => {
            // Identity model-view: the MVP is the projection itself.
            let projection = compute_projection(config, state.snapshot())?;
            let uniforms = ShaderUniforms::new(state.snapshot(), config, &projection.matrix);
            out = serde_json::to_string_pretty(&uniforms)?;
        }
        Command::Stripes => {
            let stripes = lens_stripes(&state.snapshot().screen, &state.snapshot().sheet);
            if json {
                out = serde_json::to_string_pretty(&stripes)?;
            } else {
                writeln!(out, "x width")?;
                for s in stripes {
                    writeln!(out, "{:.3} {:.3}", s.x, s.width)?;
                }
            }
        }
    }
    Ok(out)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    debug!("config: {config:?}");
    let output = render(&args.command, &config, args.json)?;
    print!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn write_json<T: serde::Serialize>(value: &T, path: &Path) {
        serde_json::to_writer_pretty(fs::File::create(path).unwrap(), value).unwrap();
    }

    #[test]
    fn config_file_roundtrip() {
        let config = CalibrationConfig {
            h_res: 1920,
            v_res: 1080,
            screen_diagonal: 24.0,
            upscale: 2,
            ..Default::default()
        };
        let file = NamedTempFile::new().unwrap();
        write_json(&config, file.path());

        let loaded = load_config(file.path().to_str()).expect("config should load");
        assert_eq!(loaded, config);

        let json = render(&Command::ViewMap { valid_only: false }, &loaded, true).unwrap();
        let entries: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(entries.len(), 2 * 1920);
    }

    #[test]
    fn report_text_has_sections() {
        let text = render(&Command::Report, &CalibrationConfig::default(), false).unwrap();
        assert!(text.contains("/// SCREEN ///"));
        assert!(text.contains("Spatial Resolution: 369"));
    }

    #[test]
    fn projection_text_lists_matrix() {
        let text = render(&Command::Projection, &CalibrationConfig::default(), false).unwrap();
        assert!(text.contains("distance: 1.500000"));
        assert_eq!(text.lines().filter(|l| l.starts_with('[')).count(), 4);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let config = CalibrationConfig {
            h_res: 0,
            ..Default::default()
        };
        assert!(render(&Command::Report, &config, false).is_err());

        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "{ not json").unwrap();
        assert!(load_config(file.path().to_str()).is_err());
    }

    #[test]
    fn valid_only_filters_view_map() {
        let config = CalibrationConfig::default();
        let all = render(&Command::ViewMap { valid_only: false }, &config, true).unwrap();
        let valid = render(&Command::ViewMap { valid_only: true }, &config, true).unwrap();
        let all: Vec<serde_json::Value> = serde_json::from_str(&all).unwrap();
        let valid: Vec<serde_json::Value> = serde_json::from_str(&valid).unwrap();
        assert!(valid.len() < all.len());
        assert!(valid.iter().all(|e| e["valid"] == true));
    }

    #[test]
    fn uniforms_use_glsl_names_and_projection() {
        let config = CalibrationConfig {
            test_projection: true,
            ..Default::default()
        };
        let json = render(&Command::Uniforms, &config, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for key in [
            "_resAngSpat",
            "_screenDPMM",
            "_res",
            "_upscale",
            "_lentWidthOff",
            "_viewPos",
            "_positional",
            "_modelViewProjection",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["_resAngSpat"][1], 369.0);

        // Last row of P·R·T(-eye) is (0, 0, -1, eye.z); identity has (0, 0, 0, 1).
        assert_eq!(value["_modelViewProjection"][2][3], -1.0);
        assert_eq!(value["_modelViewProjection"][3][3], 1.5);
    }

    #[test]
    fn uniforms_fail_for_viewpoint_behind_screen() {
        let config = CalibrationConfig {
            viewpoint: lenticular_core::Pt3::new(0.0, 0.0, -2.0),
            ..Default::default()
        };
        assert!(render(&Command::Projection, &config, true).is_err());
        assert!(render(&Command::Uniforms, &config, true).is_err());
    }

    #[test]
    fn stripes_text_and_json_agree() {
        let config = CalibrationConfig::default();
        let text = render(&Command::Stripes, &config, false).unwrap();
        let json = render(&Command::Stripes, &config, true).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("x width"));
        let rows: Vec<&str> = lines.collect();

        let stripes: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert!(!stripes.is_empty());
        assert_eq!(rows.len(), stripes.len());

        // 0.5 offset: the first stripe starts half a lens in.
        let width = stripes[0]["width"].as_f64().unwrap();
        let x = stripes[0]["x"].as_f64().unwrap();
        assert!((x - 0.5 * width).abs() < 1e-9);
        assert_eq!(rows[0], format!("{x:.3} {width:.3}"));
    }
}
