//! CSV export for dispatch results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::ResultsView;

/// Column header for the per-step CSV export.
const HEADER: &str = "timestep,time_hr,production_mwh,price,soc_start_mwh,soc_end_mwh,\
                       stored_mwh,sold_mwh,revenue,charging_mwh,discharging_mwh,\
                       loss_charge_mwh,loss_discharge_mwh,action";

/// Exports per-step results to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(view: &ResultsView, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(view, buf)
}

/// Writes per-step results as CSV to any writer.
///
/// One header row followed by one row per simulated step. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(view: &ResultsView, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    let trace = view.trace();
    let soc = trace.soc();
    let revenue = view.revenue_curve();
    let loss_charge = view.loss_charge_curve();
    let loss_discharge = view.loss_discharge_curve();

    for t in 0..view.horizon() {
        wtr.write_record(&[
            t.to_string(),
            format!("{:.2}", t as f64 * view.dt_hours()),
            format!("{:.6}", view.production()[t]),
            format!("{:.4}", view.price()[t]),
            format!("{:.6}", soc[t]),
            format!("{:.6}", soc[t + 1]),
            format!("{:.6}", trace.stored_energy()[t]),
            format!("{:.6}", trace.sold_energy()[t]),
            format!("{:.4}", revenue[t]),
            format!("{:.6}", view.charging_curve()[t]),
            format!("{:.6}", view.discharging_curve()[t]),
            format!("{:.6}", loss_charge[t]),
            format!("{:.6}", loss_discharge[t]),
            trace.actions()[t].to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::BatteryParams;
    use crate::sim::{DispatchThresholds, simulate};

    fn make_view(steps: usize) -> ResultsView {
        let battery = BatteryParams::new(100.0, 10.0, 10.0, 0.95, 0.95, 0.0).unwrap();
        let production = vec![20.0; steps];
        let price: Vec<f64> = (0..steps).map(|t| [5.0, 50.0, 95.0][t % 3]).collect();
        let thresholds = DispatchThresholds::new(10.0, 90.0).unwrap();
        let trace = simulate(&battery, &production, &price, 1.0, &thresholds).unwrap();
        ResultsView::new(battery, trace, price, production, 1.0).unwrap()
    }

    #[test]
    fn header_matches_columns() {
        let mut buf = Vec::new();
        write_csv(&make_view(1), &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let first_line = output.lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "timestep,time_hr,production_mwh,price,soc_start_mwh,soc_end_mwh,\
             stored_mwh,sold_mwh,revenue,charging_mwh,discharging_mwh,\
             loss_charge_mwh,loss_discharge_mwh,action"
        );
    }

    #[test]
    fn row_count_matches_step_count() {
        let mut buf = Vec::new();
        write_csv(&make_view(24), &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        // 1 header + 24 data rows
        assert_eq!(output.lines().count(), 25);
    }

    #[test]
    fn empty_horizon_writes_header_only() {
        let mut buf = Vec::new();
        write_csv(&make_view(0), &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn deterministic_output() {
        let view = make_view(6);
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&view, &mut buf1).unwrap();
        write_csv(&view, &mut buf2).unwrap();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn rows_are_parseable() {
        let mut buf = Vec::new();
        write_csv(&make_view(3), &mut buf).unwrap();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        assert_eq!(rdr.headers().map(csv::StringRecord::len).ok(), Some(14));

        let mut actions = Vec::new();
        for record in rdr.records() {
            let rec = record.unwrap();
            for i in 1..13 {
                assert!(rec[i].parse::<f64>().is_ok(), "column {i} should parse as f64");
            }
            actions.push(rec[13].to_string());
        }
        assert_eq!(actions, vec!["charge", "hold", "discharge"]);
    }
}
