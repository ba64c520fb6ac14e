use super::*;

#[test]
fn test_creates_temp_dir_and_writes_file() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TempDirFixture::new()?;
    let path = fixture.write_file("inputs/graph.json", "[]")?;

    assert!(fixture.file_exists("inputs/graph.json"));
    assert!(path.is_file());
    assert_eq!(fixture.read_file("inputs/graph.json")?, "[]");
    Ok(())
}

#[test]
fn test_write_json_round_trips_through_serde() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TempDirFixture::new()?;
    fixture.write_json("ids.json", &vec!["s/a@1.0.0"])?;
    let ids: Vec<String> = serde_json::from_str(&fixture.read_file("ids.json")?)?;
    assert_eq!(ids, vec!["s/a@1.0.0".to_string()]);
    Ok(())
}

#[test]
fn test_temp_dir_isolation() -> Result<(), Box<dyn std::error::Error>> {
    let first = TempDirFixture::new()?;
    let second = TempDirFixture::new()?;
    first.write_file("only-here.json", "{}")?;
    assert_ne!(first.path(), second.path());
    assert!(!second.file_exists("only-here.json"));
    Ok(())
}
