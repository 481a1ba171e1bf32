//! Presets command.

use crate::config::Settings;
use crate::io::{Preset, Tabular, render_table};
use crate::terminal::{SizeProbe, StdoutProbe};

struct PresetRow(Preset);

impl Tabular for PresetRow {
    const COLUMNS: &'static [&'static str] = &["Preset", "Frames", "Interval"];

    fn cells(&self) -> Vec<String> {
        let spec = self.0.spec();
        vec![
            self.0.name().to_string(),
            spec.frames().join(" "),
            format!("{}ms", spec.interval().as_millis()),
        ]
    }
}

/// Show every built-in animation in a table.
pub fn run_presets(settings: &Settings) -> anyhow::Result<()> {
    let rows: Vec<PresetRow> = Preset::ALL.into_iter().map(PresetRow).collect();
    let width = StdoutProbe.width_or(settings.printer.fallback_width);
    let mut stdout = std::io::stdout().lock();
    render_table(&mut stdout, "spinner presets", &rows, width)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_row_cells() {
        let cells = PresetRow(Preset::Hourglass).cells();
        assert_eq!(cells, ["hourglass", "⏳ ⌛", "500ms"]);
        assert_eq!(cells.len(), PresetRow::COLUMNS.len());
    }
}
