use brandscope_engine::{ModeDescriptor, DETAILED_MODES, HISTORICAL_MODES};

pub(crate) fn run_modes(historical: bool) {
    let modes: &[ModeDescriptor] = if historical {
        &HISTORICAL_MODES
    } else {
        &DETAILED_MODES
    };

    println!("{:<46} {:<6} {}", "ID", "CHART", "NAME");
    println!("{}", "-".repeat(80));
    for mode in modes {
        println!(
            "{:<46} {:<6} {}",
            mode.id.as_str(),
            mode.chart.to_string(),
            mode.name
        );
    }
}
