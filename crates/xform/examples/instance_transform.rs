//! Apply a per-instance transform string to a handful of vertices, the way a
//! mesh loader does, then take the transform apart again.
//!
//!   cargo run -p xform --example instance_transform -- "0 0 1 1 0 0 0 1 0 5 0 0"

use xform::{AffineMatrix3D, Vec3};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "2 0 0  0 2 0  0 0 2  1 1 1".to_string());
    let m: AffineMatrix3D = text.parse()?;

    let mut vertices = vec![Vec3::zeros(), Vec3::x(), Vec3::y(), Vec3::z()];
    m.transform_points(&mut vertices);
    for v in &vertices {
        println!("{:>8.3} {:>8.3} {:>8.3}", v.x, v.y, v.z);
    }

    let d = m.decompose();
    println!("success={} scale={:?} translation={:?}", d.success, d.scale.as_slice(), d.translation.as_slice());
    match m.invert() {
        Some(inv) => println!("inverse = {inv}"),
        None => println!("singular"),
    }
    Ok(())
}
