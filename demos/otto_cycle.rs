//! Solves an air-standard Otto cycle and prints its state table, work and
//! heat per process, and sampled diagram curves.

use std::error::Error;

use cycle_models::{
    models::cycle::{Cycle, ProcessKind},
    support::{
        thermo::{Point, fluid::Air, model::IdealGas},
        units::{parse_pressure, parse_temperature},
    },
};
use tracing::Level;
use uom::si::{f64::SpecificVolume, specific_volume::cubic_meter_per_kilogram};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let mut cycle = Cycle::new(IdealGas::of::<Air>()?);

    let p1 = cycle.add_point(
        Point::new("1")
            .with_temperature(parse_temperature("300 K")?)
            .with_pressure(parse_pressure("1 bar")?),
    );
    let p2 = cycle.add_point(
        Point::new("2").with_specific_volume(SpecificVolume::new::<cubic_meter_per_kilogram>(0.0703)),
    );
    let p3 = cycle.add_point(Point::new("3").with_temperature(parse_temperature("1600 K")?));
    let p4 = cycle.add_point(Point::new("4"));

    cycle.add_process(ProcessKind::Isentropic, p1, p2)?;
    cycle.add_process(ProcessKind::Isochoric, p2, p3)?;
    cycle.add_process(ProcessKind::Isentropic, p3, p4)?;
    cycle.add_process(ProcessKind::Isochoric, p4, p1)?;

    let solution = cycle.solve()?;
    println!("{:?} after {} pass(es)\n", solution.status, solution.passes);
    println!("{}", cycle.report());

    for segment in cycle.segments() {
        println!("\n{} {} -> {}", segment.kind, segment.start.name(), segment.end.name());
        if let Some(path) = segment.pv_path(5) {
            for (v, p) in path {
                println!("  v = {v:>10.5} m3/kg   p = {:>10.2} kPa", p / 1000.0);
            }
        }
        if let Some(path) = segment.ts_path(5) {
            for (s, t) in path {
                println!("  s = {s:>10.2} J/kg/K  T = {t:>10.2} K");
            }
        }
    }

    Ok(())
}
