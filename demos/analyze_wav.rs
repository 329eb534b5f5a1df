//! Analyze a recorded vowel from a WAV file
//!
//! Usage: cargo run --example analyze_wav -- <file.wav> [language] [ipa]
//!
//! `language` is one of the built-in table names (e.g. "spanish"); when both
//! a language and an IPA symbol are given, the result is scored against that
//! vowel. Set `RUST_LOG=vowelspace_core=debug` to see pipeline logs.

use std::env;
use std::error::Error;
use std::path::Path;

use tracing_subscriber::EnvFilter;
use vowelspace_core::{analyze_vowel, AnalysisConfig, Language, Sound};

/// Load a WAV file as mono, samples scaled to [-1, 1]
fn load_wav(path: &Path) -> Result<Sound, Box<dyn Error>> {
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max_value = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_value))
                .collect::<Result<_, _>>()?
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()?,
    };

    // Average channels down to mono
    let samples = interleaved
        .chunks(channels.max(1))
        .map(|frame| frame.iter().sum::<f64>() / frame.len() as f64)
        .collect();

    Ok(Sound::from_samples_owned(samples, spec.sample_rate as f64))
}

fn parse_language(name: &str) -> Option<Language> {
    let wanted = name.to_lowercase();
    Language::ALL
        .into_iter()
        .find(|l| l.name().to_lowercase().starts_with(&wanted))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("usage: analyze_wav <file.wav> [language] [ipa]");
        std::process::exit(2);
    };

    let sound = load_wav(Path::new(path))?;
    println!("File: {}", path);
    println!("  Duration: {:.3}s", sound.duration());
    println!("  Sample rate: {} Hz", sound.sample_rate());

    let config = AnalysisConfig::default();
    let analysis = analyze_vowel(&sound, &config)?;

    if analysis.lpc_model().is_degenerate() {
        println!("  LPC fit degenerate ({:?}), no formants", analysis.lpc_model().fit());
    }
    for (i, value) in analysis.formants().values().iter().enumerate() {
        let text = value.map_or("undefined".to_string(), |f| format!("{:.0} Hz", f));
        println!("  F{}: {}", i + 1, text);
    }

    let language = args.get(2).and_then(|name| parse_language(name));
    let target = language.zip(args.get(3)).and_then(|(l, ipa)| l.vowel(ipa));
    match (args.get(2), target) {
        (_, Some(target)) => match analysis.score_against(&target, config.max_distance) {
            Some(accuracy) => {
                println!(
                    "Target {} {} (F1 {:.0}, F2 {:.0})",
                    target.ipa, target.example, target.f1, target.f2
                );
                println!(
                    "  Score: {:.1} (distance {:.0} Hz) {}",
                    accuracy.score,
                    accuracy.distance,
                    accuracy.feedback().message()
                );
            }
            None => println!("F1/F2 not detected, cannot score"),
        },
        (Some(name), None) => println!("No target vowel found for {:?}", name),
        (None, None) => {}
    }

    Ok(())
}
