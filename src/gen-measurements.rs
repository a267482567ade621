use std::fs::File;
use std::io::{BufWriter, Write};

use rand::prelude::*;

const STATIONS: &[&str] = &[
    "Aden", "Berlin", "Casablanca", "Da Nang", "Erbil", "Fukuoka", "Gdansk", "Hanoi",
    "Irkutsk", "Jakarta", "Kigali", "Lima", "Manila", "Nairobi", "Oslo", "Perth",
    "Quito", "Reykjavik", "Sapporo", "Tunis",
];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let rows: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(1_000_000);
    let path = args.next().unwrap_or_else(|| "measurements.txt".to_owned());

    let mut out = BufWriter::new(File::create(path)?);
    let mut rng = rand::thread_rng();
    for _ in 0..rows {
        let station = STATIONS.choose(&mut rng).unwrap();
        let value: f64 = rng.gen_range(-99.9..99.9);
        writeln!(out, "{station};{value:.1}")?;
    }
    out.flush()?;
    Ok(())
}
