//! The `tempo check` subcommand: one-shot setup-timing report.

use crate::{CheckArgs, GlobalArgs};
use std::error::Error;
use std::fs;
use tempo_common::{delay_to_ps, slack_to_ps};
use tempo_sta::{PathQuery, StaEngine, TimingEngine};

/// Queries the design once and reports violating endpoints without
/// mutating anything. Returns the process exit code.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let design_text = fs::read_to_string(&args.design)?;
    let engine: StaEngine = serde_json::from_str(&design_text)?;

    let ends = engine.find_path_ends(&PathQuery::violating(args.max_paths));

    if global.quiet {
        return Ok(0);
    }

    if ends.is_empty() {
        println!("No setup violations");
        return Ok(0);
    }

    let wns = ends
        .iter()
        .map(|end| end.slack)
        .fold(f64::INFINITY, f64::min);
    println!("{} violating endpoints", ends.len());
    println!("WNS: {:.3}ps", slack_to_ps(wns));

    if global.verbose {
        for end in &ends {
            let pin = engine.netlist().pin(end.path.endpoint);
            let instance = engine.netlist().full_instance_name(pin.instance);
            let path_delay: f64 = end
                .path
                .steps()
                .iter()
                .filter_map(|step| step.prev_arc)
                .map(|arc| engine.intrinsic_delay(arc))
                .sum();
            println!(
                "  {instance}/{}: {:.3}ps slack, {:.3}ps path delay over {} pins",
                pin.name,
                slack_to_ps(end.slack),
                delay_to_ps(path_delay),
                end.path.len()
            );
        }
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_sta::{CellRef, Constraints, Library, Netlist};

    fn write_design(dir: &std::path::Path, period: f64) -> std::path::PathBuf {
        let mut library = Library::new();
        let slow = library.add_cell("add_sp0_w8", 900e-12);

        let mut netlist = Netlist::new();
        let u1 = netlist.add_instance("u1", None, Some(CellRef::Liberty(slow)));
        let a = netlist.add_pin(u1, "A");
        let y = netlist.add_pin(u1, "Y");
        netlist.add_cell_arc(a, y);
        netlist.mark_endpoint(y, "clk");

        let mut constraints = Constraints::new();
        constraints.set_required("clk", period);

        let engine = StaEngine::new(netlist, library, constraints);
        let path = dir.join("design.json");
        fs::write(&path, serde_json::to_string(&engine).unwrap()).unwrap();
        path
    }

    #[test]
    fn check_violating_design_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let design = write_design(dir.path(), 500e-12);
        let args = CheckArgs {
            design: design.to_string_lossy().into_owned(),
            max_paths: 2000,
        };
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
        };
        assert_eq!(run(&args, &global).unwrap(), 0);
    }

    #[test]
    fn check_met_design_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let design = write_design(dir.path(), 2e-9);
        let args = CheckArgs {
            design: design.to_string_lossy().into_owned(),
            max_paths: 2000,
        };
        let global = GlobalArgs {
            quiet: false,
            verbose: false,
        };
        assert_eq!(run(&args, &global).unwrap(), 0);
    }

    #[test]
    fn check_verbose_reports_path_details() {
        let dir = tempfile::tempdir().unwrap();
        let design = write_design(dir.path(), 500e-12);
        let args = CheckArgs {
            design: design.to_string_lossy().into_owned(),
            max_paths: 2000,
        };
        let global = GlobalArgs {
            quiet: false,
            verbose: true,
        };
        assert_eq!(run(&args, &global).unwrap(), 0);
    }

    #[test]
    fn check_missing_design_fails() {
        let args = CheckArgs {
            design: "/nonexistent/design.json".to_string(),
            max_paths: 10,
        };
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
        };
        assert!(run(&args, &global).is_err());
    }
}
