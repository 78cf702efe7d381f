//! Demo binary: the three-question synthetic survey scenario.
//!
//! Declares a 2x5x3 survey (gender, age band, preferred district), registers
//! its 1-D marginals and a conditional 2-D constraint, runs the full
//! generation pipeline, and prints the report block. An optional numeric
//! argument seeds the RNG for reproducible output; otherwise the seed comes
//! from entropy.

use ndarray::array;
use rand::SeedableRng;
use rand::rngs::StdRng;
use survey_synth::prelude::*;

fn run() -> SurveyResult<()> {
    let design = SurveyDesign::new(vec![
        vec!["Boy".to_string(), "Girl".to_string()],
        vec![
            "0-15".to_string(),
            "15-30".to_string(),
            "30-45".to_string(),
            "45-60".to_string(),
            "60-+inf".to_string(),
        ],
        vec!["TAIHU".to_string(), "LIANGXI".to_string(), "Others".to_string()],
    ])?;

    let mut builder = design.constraint_builder()?;
    builder.add_1d_constraint(0, array![50.0, 50.0], "Boys and girls count equal.")?;
    builder.add_1d_constraint(
        1,
        array![10.0, 20.0, 30.0, 20.0, 20.0],
        "Age range distribution: most people are aged 30-45.",
    )?;
    builder.add_2d_constraint(
        0,
        2,
        array![[0.5, 0.1, 0.4], [0.2, 0.7, 0.1]],
        "Boys prefer TAIHU new town while girls prefer LIANGXI new town. \
         Boys also have affection for other districts in WUXI, while girls don't.",
    )?;
    let constraints = builder.build();

    let mut rng = match std::env::args().nth(1).and_then(|arg| arg.parse::<u64>().ok()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let outcome = generate(&design, &constraints, &GenerateOptions::default(), &mut rng)?;
    for line in outcome.report_lines() {
        println!("{line}");
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("survey_synth: {err}");
        std::process::exit(1);
    }
}
