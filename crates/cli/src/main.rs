use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use polars::prelude::*;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use serde_json::json;
use std::fs::File;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;
use xform::api::{self, DecomposedParts};
use xform::AffineMatrix3D;

mod provenance;

#[derive(Parser)]
#[command(name = "xform-cli")]
#[command(about = "Decompose, invert and apply 4x4 transforms")]
struct Cmd {
    /// Optional run tag; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print scale, rotation and translation of a matrix as JSON
    Decompose {
        /// 3, 12 or 16 coefficients, separated by spaces or commas
        #[arg(long)]
        matrix: String,
    },
    /// Print the inverse of a matrix as JSON
    Invert {
        #[arg(long)]
        matrix: String,
    },
    /// Transform the x,y,z columns of a CSV and write the result with provenance
    Apply {
        #[arg(long)]
        matrix: String,
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
    },
    /// Print a small provenance JSON block
    Report,
}

/// JSON view of [`DecomposedParts`]; rotation is `(x, y, z, w)`.
struct DecomposeJson(DecomposedParts);

impl Serialize for DecomposeJson {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let p = &self.0;
        let mut st = serializer.serialize_struct("Decomposition", 4)?;
        st.serialize_field("scale", &p.scale)?;
        st.serialize_field("rotation", &p.rotation)?;
        st.serialize_field("translation", &p.translation)?;
        st.serialize_field("success", &p.success)?;
        st.end()
    }
}

#[derive(Serialize)]
struct InvertOut {
    determinant: f64,
    invertible: bool,
    /// Row-major; absent when singular.
    inverse: Option<Vec<f64>>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Decompose { matrix } => decompose(&matrix, cmd.tag),
        Action::Invert { matrix } => invert(&matrix, cmd.tag),
        Action::Apply { matrix, input, out } => apply(&matrix, input, out, cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn parse_matrix(text: &str) -> Result<AffineMatrix3D> {
    text.parse::<AffineMatrix3D>()
        .with_context(|| format!("parsing --matrix {text:?}"))
}

fn decompose(matrix: &str, tag: Option<String>) -> Result<()> {
    let m = parse_matrix(matrix)?;
    let parts = DecomposeJson(m.decompose().into());
    tracing::info!(success = parts.0.success, tag = ?tag, "decompose");
    println!("{}", serde_json::to_string_pretty(&parts)?);
    Ok(())
}

fn invert(matrix: &str, tag: Option<String>) -> Result<()> {
    let m = parse_matrix(matrix)?;
    let inverse = m.invert().map(|inv| api::matrix_to_coeffs(&inv).to_vec());
    let out = InvertOut {
        determinant: m.determinant(),
        invertible: inverse.is_some(),
        inverse,
    };
    tracing::info!(invertible = out.invertible, det = out.determinant, tag = ?tag, "invert");
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Read `x`, `y`, `z` as f64 columns; nulls are an error.
fn read_points(input: &str) -> Result<Vec<[f64; 3]>> {
    let df = LazyCsvReader::new(input)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {input}"))?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
            col("z").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x,y,z from {input}"))?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    let zs = df.column("z")?.f64()?;
    if xs.null_count() + ys.null_count() + zs.null_count() > 0 {
        bail!("{input}: x,y,z columns contain empty cells");
    }
    Ok(xs
        .into_no_null_iter()
        .zip(ys.into_no_null_iter())
        .zip(zs.into_no_null_iter())
        .map(|((x, y), z)| [x, y, z])
        .collect())
}

fn write_points(out: &str, points: &[[f64; 3]]) -> Result<()> {
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let column = |i: usize| points.iter().map(|p| p[i]).collect::<Vec<f64>>();
    let mut df = df!("x" => column(0), "y" => column(1), "z" => column(2))?;
    let mut file = File::create(out_path).with_context(|| format!("creating {out}"))?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    Ok(())
}

fn apply(matrix: &str, input: String, out: String, tag: Option<String>) -> Result<()> {
    let m = parse_matrix(matrix)?;
    let mut points = read_points(&input)?;
    tracing::info!(rows = points.len(), input, out, tag = ?tag, "apply");
    api::transform_xyz(&m, &mut points);
    write_points(&out, &points)?;

    let run = provenance::PointCloudRun {
        matrix: api::matrix_to_coeffs(&m),
        input,
        rows: points.len(),
        tag,
    };
    let prov = provenance::write_sidecar(Path::new(&out), &run)?;
    tracing::info!(provenance = %prov.display(), "wrote provenance");
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::code_rev(),
        "version": xform::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn points_round_trip_through_csv() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        std::fs::write(&input, "id,x,y,z\n0,1,2,3\n1,-1,0.5,4\n").unwrap();
        let input = input.to_string_lossy().to_string();

        let mut points = read_points(&input).unwrap();
        assert_eq!(points, vec![[1.0, 2.0, 3.0], [-1.0, 0.5, 4.0]]);

        let m = parse_matrix("10 20 30").unwrap();
        api::transform_xyz(&m, &mut points);
        let out = dir.path().join("nested/out.csv").to_string_lossy().to_string();
        write_points(&out, &points).unwrap();
        assert_eq!(read_points(&out).unwrap(), vec![[11.0, 22.0, 33.0], [9.0, 20.5, 34.0]]);
    }

    #[test]
    fn decomposition_serializes_as_flat_object() {
        let m = parse_matrix("4 5 6").unwrap();
        let v = serde_json::to_value(DecomposeJson(m.decompose().into())).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["scale"], json!([1.0, 1.0, 1.0]));
        assert_eq!(v["translation"], json!([4.0, 5.0, 6.0]));
        assert_eq!(v["rotation"], json!([0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn bad_matrix_text_is_reported() {
        let err = parse_matrix("1 2").unwrap_err();
        assert!(format!("{err:#}").contains("got 2"));
    }
}
