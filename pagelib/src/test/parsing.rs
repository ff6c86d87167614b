use std::error::Error;
use std::io::Write;
use crate::config::{Algorithm, SimulationConfig};
use crate::error::SimulationError;
use crate::io::{parse_frame_count, parse_references, read_references};

#[test]
fn references_with_mixed_separators() {
    assert_eq!(parse_references("1 2,3 ,\t4\n5,,6"), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(parse_references("  ,7,  "), vec![7]);
}

#[test]
fn references_drop_malformed_tokens() {
    assert_eq!(parse_references("1 two 3 4.5 -2 0x10 +8"), vec![1, 3, -2, 8]);
}

#[test]
fn empty_reference_strings() {
    assert!(parse_references("").is_empty());
    assert!(parse_references(" , ,\n").is_empty());
    assert!(parse_references("a b c").is_empty());
}

#[test]
fn frame_counts_clamp_to_one() {
    assert_eq!(parse_frame_count("3"), 3);
    assert_eq!(parse_frame_count(" 12 "), 12);
    assert_eq!(parse_frame_count("0"), 1);
    assert_eq!(parse_frame_count("-4"), 1);
    assert_eq!(parse_frame_count(""), 1);
    assert_eq!(parse_frame_count("three"), 1);
}

#[test]
fn algorithm_names() -> Result<(), Box<dyn Error>> {
    assert_eq!("FIFO".parse::<Algorithm>()?, Algorithm::Fifo);
    assert_eq!("fifo".parse::<Algorithm>()?, Algorithm::Fifo);
    assert_eq!("Lru".parse::<Algorithm>()?, Algorithm::Lru);
    assert_eq!("Optimal".parse::<Algorithm>()?, Algorithm::Optimal);
    assert_eq!("opt".parse::<Algorithm>()?, Algorithm::Optimal);
    assert_eq!(" min ".parse::<Algorithm>()?, Algorithm::Optimal);
    assert!(matches!("clock".parse::<Algorithm>(), Err(SimulationError::UnknownAlgorithm(name)) if name == "clock"));
    assert!("".parse::<Algorithm>().is_err());
    Ok(())
}

#[test]
fn algorithm_display_round_trips() -> Result<(), Box<dyn Error>> {
    for algorithm in Algorithm::ALL {
        assert_eq!(algorithm.to_string().parse::<Algorithm>()?, algorithm);
    }
    Ok(())
}

#[test]
fn config_with_reference_string() -> Result<(), Box<dyn Error>> {
    let config: SimulationConfig = serde_json::from_str(r#"{"references": "1, 2 x 3", "frames": 2, "algorithm": "lru"}"#)?;
    assert_eq!(config.reference_sequence(), vec![1, 2, 3]);
    assert_eq!(config.frame_count(), 2);
    assert_eq!(config.algorithm, Algorithm::Lru);
    Ok(())
}

#[test]
fn config_with_reference_list_and_defaults() -> Result<(), Box<dyn Error>> {
    let config: SimulationConfig = serde_json::from_str(r#"{"references": [4, 0, -1]}"#)?;
    assert_eq!(config.reference_sequence(), vec![4, 0, -1]);
    assert_eq!(config.frame_count(), 3);
    assert_eq!(config.algorithm, Algorithm::Fifo);
    Ok(())
}

#[test]
fn config_clamps_frames_and_accepts_aliases() -> Result<(), Box<dyn Error>> {
    let config: SimulationConfig = serde_json::from_str(r#"{"references": [], "frames": 0, "algorithm": "opt"}"#)?;
    assert_eq!(config.frame_count(), 1);
    assert_eq!(config.algorithm, Algorithm::Optimal);
    assert!(serde_json::from_str::<SimulationConfig>(r#"{"references": [1], "algorithm": "clock"}"#).is_err());
    Ok(())
}

#[test]
fn config_negative_frames_clamp_to_one() -> Result<(), Box<dyn Error>> {
    let config: SimulationConfig = serde_json::from_str(r#"{"references": [1, 2], "frames": -2}"#)?;
    assert_eq!(config.frames, -2);
    assert_eq!(config.frame_count(), 1);
    let config: SimulationConfig = serde_json::from_str(r#"{"references": [1], "frames": 9000000000}"#)?;
    assert!(crate::simulator::simulate(&config.reference_sequence(), config.frame_count(), config.algorithm).is_err());
    Ok(())
}

#[test]
fn reference_files() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join(format!("pagelib-references-{}.txt", std::process::id()));
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "7 0 1 2")?;
    writeln!(file, "0, 3, 0")?;
    drop(file);
    let references = read_references(&path)?;
    std::fs::remove_file(&path)?;
    assert_eq!(references, vec![7, 0, 1, 2, 0, 3, 0]);
    Ok(())
}

#[test]
fn empty_reference_file() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join(format!("pagelib-empty-{}.txt", std::process::id()));
    std::fs::File::create(&path)?;
    let references = read_references(&path)?;
    std::fs::remove_file(&path)?;
    assert!(references.is_empty());
    Ok(())
}

#[test]
fn missing_reference_file() {
    let result = read_references("/nonexistent/pagelib/references.txt");
    assert!(matches!(result, Err(SimulationError::Io(_))));
}
