use camino::Utf8PathBuf;
use fibspiral::{MAX_TERMS, MIN_TERMS, SpiralParams, render_spiral_png};
use rayon::prelude::*;
use std::fs;

const USAGE: &str = "Usage: cargo xtask <command>
Commands:
  gallery [--max-terms N] [--size S] [--out DIR]
                  Render every term count from 1 to N (default 12) at S pixels
                  (default 400) into DIR (default target/gallery)";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };

    let result = match command.as_str() {
        "gallery" => GalleryArgs::parse(rest).and_then(|args| gallery(&args)),
        _ => Err(format!("Unknown command: {command}\n{USAGE}")),
    };
    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

#[derive(Debug, PartialEq)]
struct GalleryArgs {
    max_terms: u32,
    size: i64,
    out: Utf8PathBuf,
}

impl GalleryArgs {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut parsed = GalleryArgs {
            max_terms: 12,
            size: 400,
            out: Utf8PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../target/gallery")),
        };
        let mut iter = args.iter();
        while let Some(flag) = iter.next() {
            let value = iter
                .next()
                .ok_or_else(|| format!("{flag} needs a value"))?;
            match flag.as_str() {
                "--max-terms" => {
                    let n: u32 = value
                        .parse()
                        .map_err(|_| format!("--max-terms: not a number: {value}"))?;
                    parsed.max_terms = n.clamp(MIN_TERMS, MAX_TERMS);
                }
                "--size" => {
                    parsed.size = value
                        .parse()
                        .map_err(|_| format!("--size: not a number: {value}"))?;
                }
                "--out" => parsed.out = Utf8PathBuf::from(value),
                _ => return Err(format!("Unknown flag: {flag}\n{USAGE}")),
            }
        }
        Ok(parsed)
    }
}

fn gallery(args: &GalleryArgs) -> Result<(), String> {
    // Validate once up front so workers only fail on real render errors.
    SpiralParams::new(1, args.size).map_err(|e| e.to_string())?;
    fs::create_dir_all(&args.out).map_err(|e| format!("creating {}: {e}", args.out))?;

    let mut written: Vec<(u32, String)> = (MIN_TERMS..=args.max_terms)
        .into_par_iter()
        .map(|terms| -> Result<(u32, String), String> {
            let params = SpiralParams::new(terms as i64, args.size).map_err(|e| e.to_string())?;
            let png = render_spiral_png(&params).map_err(|e| format!("terms={terms}: {e}"))?;
            let name = file_name(terms);
            let path = args.out.join(&name);
            fs::write(&path, png).map_err(|e| format!("writing {path}: {e}"))?;
            eprintln!("Rendered {path}");
            Ok((terms, name))
        })
        .collect::<Result<_, String>>()?;
    written.sort();

    let index = args.out.join("index.html");
    fs::write(&index, contact_sheet(&written, args.size))
        .map_err(|e| format!("writing {index}: {e}"))?;
    println!("Generated gallery at: {index}");
    Ok(())
}

fn file_name(terms: u32) -> String {
    format!("spiral_{terms:02}.png")
}

fn contact_sheet(entries: &[(u32, String)], size: i64) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Fibonacci spiral gallery</title>
    <style>
        body { font-family: system-ui, sans-serif; background: #eee; margin: 24px; }
        .grid { display: flex; flex-wrap: wrap; gap: 16px; }
        figure { margin: 0; background: #fff; padding: 8px; border-radius: 6px; }
        figcaption { text-align: center; font-size: 13px; color: #555; }
        img { display: block; width: 240px; height: 240px; }
    </style>
</head>
<body>
<div class="grid">
"#,
    );
    for (terms, name) in entries {
        html.push_str(&format!(
            "<figure><img src=\"{name}\" alt=\"{terms} terms\"><figcaption>terms = {terms}, {size}px</figcaption></figure>\n"
        ));
    }
    html.push_str("</div>\n</body></html>\n");
    html
}
