//! Human-readable dump of the current calibration.

use std::fmt;

use lenticular_core::{LenticularSheet, LightfieldResolution, ScreenGeometry};
use log::info;
use serde::{Deserialize, Serialize};

use crate::CalibrationSnapshot;

/// The "SCREEN / LENTICULAR / LIGHTFIELD" sanity-check report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub screen: ScreenGeometry,
    pub lenticular: LenticularSheet,
    pub lightfield: LightfieldResolution,
}

/// One titled block of `label: value` lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: &'static str,
    pub entries: Vec<(&'static str, String)>,
}

impl DiagnosticReport {
    pub fn new(snapshot: &CalibrationSnapshot) -> Self {
        Self {
            screen: snapshot.screen,
            lenticular: snapshot.sheet,
            lightfield: snapshot.lightfield,
        }
    }

    pub fn sections(&self) -> [ReportSection; 3] {
        let s = &self.screen;
        let l = &self.lenticular;
        let lf = &self.lightfield;
        [
            ReportSection {
                title: "SCREEN",
                entries: vec![
                    ("Resolution (W, H)", format!("{}, {}", s.h_res, s.v_res)),
                    ("Size, Width (in)", format!("{}, {:.4}", s.diagonal, s.width)),
                    ("Height (in)", format!("{:.4}", s.height)),
                    (
                        "DPI, DPMM",
                        format!("{:.4}, {:.4}", s.dots_per_inch, s.dots_per_mm),
                    ),
                ],
            },
            ReportSection {
                title: "LENTICULAR",
                entries: vec![
                    (
                        "LPI, LPMM",
                        format!("{}, {:.4}", l.lines_per_inch, l.lines_per_mm),
                    ),
                    ("Lens Width (mm)", format!("{:.4}", l.lens_width)),
                    ("Lens Offset", format!("{}", l.offset)),
                    ("Lens Thickness (mm)", format!("{}", l.thickness)),
                ],
            },
            ReportSection {
                title: "LIGHTFIELD",
                entries: vec![
                    ("Spatial Resolution", lf.spatial_res.to_string()),
                    ("Angular Resolution", lf.angular_res.to_string()),
                ],
            },
        ]
    }

    /// Emit the report to the log, one line per entry.
    pub fn log(&self) {
        for section in self.sections() {
            info!("/// {} ///", section.title);
            for (label, value) in &section.entries {
                info!("{label}: {value}");
            }
        }
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in self.sections() {
            writeln!(f, "/// {} ///", section.title)?;
            for (label, value) in &section.entries {
                writeln!(f, "{label}: {value}")?;
            }
        }
        Ok(())
    }
}
