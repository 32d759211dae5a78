use conetrack::{Cone, ConeOrderer, OrderConfig, Point};
use std::error::Error;
use std::path::Path;

#[derive(serde::Deserialize)]
struct Detections {
    #[serde(default)]
    origin: Option<Point>,
    cones: Vec<Cone>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <detections.json> [config.json]", args[0]);
        std::process::exit(2);
    }

    let data = std::fs::read_to_string(&args[1])?;
    let detections: Detections = serde_json::from_str(&data)?;
    let config = match args.get(2) {
        Some(path) => OrderConfig::from_json_file(Path::new(path))?,
        None => OrderConfig::default(),
    };

    let origin = detections.origin.unwrap_or_else(Point::origin);
    let track = ConeOrderer::new(config).order_detections(&detections.cones, origin)?;
    for side in [&track.left, &track.right] {
        println!(
            "{}: {} cones (closed={}, truncated={})",
            side.side,
            side.len(),
            side.closed,
            side.truncated
        );
        for p in side.points() {
            println!("  {:.3} {:.3}", p.x, p.y);
        }
    }
    Ok(())
}
