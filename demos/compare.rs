use std::{fs, io};

use advect1d::{diagnostics, Config, Csff1Writer, Driver, Logger, Shape, Simulation};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = Config::default()
        .with_courant(0.8)
        .with_shape(Shape::Square, 0.1, 0.25);

    let sim = Simulation::new(&config).expect("invalid configuration");
    println!("{sim}");

    fs::create_dir_all("bin").expect("couldn't create output directory");

    for &scheme in &config.schemes {
        let mut output = io::BufWriter::new(
            fs::File::create(format!("bin/{}.csff1", scheme.name().to_lowercase()))
                .expect("couldn't create output file"),
        );

        let solution = Driver::new(&sim, scheme.method())
            .with_time_sampling(diagnostics::frame_stride(sim.mesh().nt()))
            .with_observer(Logger)
            .with_observer(Csff1Writer::new(&mut output))
            .run()
            .expect("failed to run simulation");

        println!(
            "{:>12}: max|u| {:.3e} -> {:.3e}, mass drift {:+.3e}",
            scheme,
            diagnostics::max_abs(solution.snapshot(0)),
            diagnostics::max_abs(solution.last()),
            diagnostics::relative_drift(solution.mass()),
        );
    }
}
