use rowtally::{summarize, Settings};

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "measurements.txt".to_owned());

    let summary = summarize(&path, &Settings::default())?;
    for warning in &summary.warnings {
        eprintln!("{warning}");
    }
    println!("{summary}");
    Ok(())
}
