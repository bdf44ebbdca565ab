use langlens::{
    AnalysisFailure, AnalysisOptions, CustomDictionary, WordListModel, perform_analysis,
    perform_analysis_with, perform_spell_check,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const GUIDE_LINE: &str =
    "npc.guide.01=Welcome, explorer! Let's learn about renewable energy today.";

const PADDING: &str = "\
## Localization strings for the energy lab world.
## Lines starting with two hashes are comments and carry no text.
";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn full_world(root: &Path, file: &str) {
    let content = format!(
        "{PADDING}{GUIDE_LINE}\n\
         npc.guide.02=Solar panels turn sunlight into electricity for the village.\n\
         tutorial.wind=Wind turbines spin when the wind blows across the hills.\n\
         item.stone.name=minecraft:stone\n"
    );
    write(root, file, &content);
}

#[test]
fn test_no_localization_files() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "level.dat", "binary");

    let model = WordListModel::from_words(["welcome"]);
    let dictionary = CustomDictionary::in_memory(Vec::<String>::new());

    let err = perform_analysis(tmp.path()).unwrap_err();
    assert_eq!(err, AnalysisFailure::NoLocalizationFiles);
    assert!(err.to_string().starts_with("No localization files found"));

    let err = perform_spell_check(tmp.path(), &model, &dictionary).unwrap_err();
    assert_eq!(err, AnalysisFailure::NoLocalizationFiles);
}

#[test]
fn test_missing_world_folder() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(
        perform_analysis(tmp.path().join("gone")).unwrap_err(),
        AnalysisFailure::WorldFolderMissing
    );
}

#[test]
fn test_single_line_file_is_too_small() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "texts/en_us.lang", &format!("{GUIDE_LINE}\n"));

    match perform_analysis(tmp.path()).unwrap_err() {
        AnalysisFailure::FileTooSmall { name, size_kb } => {
            assert_eq!(name, "en_us.lang");
            assert_eq!(size_kb, 0.07);
        }
        other => panic!("unexpected failure: {other}"),
    }
}

#[test]
fn test_single_entry_has_insufficient_words() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "texts/en_us.lang", &format!("{PADDING}{GUIDE_LINE}\n"));

    let err = perform_analysis(tmp.path()).unwrap_err();
    assert_eq!(
        err,
        AnalysisFailure::InsufficientWords {
            name: "en_us.lang".into(),
            words: 8,
            required: 15,
        }
    );
    assert!(err.to_string().contains("only 8 words"));
}

#[test]
fn test_lower_thresholds_accept_single_entry() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "texts/en_us.lang", &format!("{PADDING}{GUIDE_LINE}\n"));

    let options = AnalysisOptions::new().with_min_words(5);
    let report = perform_analysis_with(tmp.path(), &options).unwrap();
    assert_eq!(report.analyzed_file.extracted_text_words, 8);
}

#[test]
fn test_insufficient_content_length() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "en_US.lang",
        &format!("{PADDING}npc.a=Hello there my friend.\n"),
    );

    assert_eq!(
        perform_analysis(tmp.path()).unwrap_err(),
        AnalysisFailure::InsufficientContent {
            name: "en_US.lang".into(),
            chars: 22,
            required: 50,
        }
    );
}

#[test]
fn test_no_educational_content() {
    let tmp = TempDir::new().unwrap();
    let content = "item.stone.name=minecraft:stone\n".repeat(5);
    write(tmp.path(), "en_US.lang", &content);

    assert_eq!(
        perform_analysis(tmp.path()).unwrap_err(),
        AnalysisFailure::NoEducationalContent {
            name: "en_US.lang".into(),
            total_entries: 5,
        }
    );
}

#[test]
fn test_full_readability_report() {
    let tmp = TempDir::new().unwrap();
    full_world(tmp.path(), "resource_packs/lab/texts/en_US.lang");
    write(tmp.path(), "resource_packs/lab/texts/de_DE.lang", &"x".repeat(4000));

    let report = perform_analysis(tmp.path()).unwrap();
    let file = &report.analyzed_file;
    assert_eq!(file.name, "en_US.lang");
    assert_eq!(file.path, "resource_packs/lab/texts/en_US.lang");
    assert_eq!(file.locale, "English (United States)");
    assert!(file.is_primary_locale);
    assert_eq!(file.total_files_found, 2);
    assert_eq!(file.total_entries, 4);
    assert_eq!(file.educational_entries, 3);
    assert_eq!(file.educational_percentage, 75.0);
    assert!(file.extracted_text_words >= 15);

    assert!(report.warning.is_none());
    assert!(report.sample_text.starts_with("Welcome, explorer!"));
    assert_eq!(report.full_text_length, file.extracted_text_chars);
    assert!(report.metrics.target_age >= 6);
    assert_eq!(
        report.metrics.target_age_label,
        format!("{} years", report.metrics.target_age)
    );

    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("flesch_reading_ease").is_some());
    assert!(json.get("analyzed_file").is_some());
    assert!(json.get("warning").is_none());
}

#[test]
fn test_fallback_locale_carries_warning() {
    let tmp = TempDir::new().unwrap();
    full_world(tmp.path(), "texts/fr_FR.lang");

    let report = perform_analysis(tmp.path()).unwrap();
    assert!(!report.analyzed_file.is_primary_locale);
    let warning = report.warning.unwrap();
    assert!(warning.contains("fr_FR.lang"));
    assert!(warning.contains("French (France)"));
}

#[test]
fn test_spell_check_report() {
    let tmp = TempDir::new().unwrap();
    full_world(tmp.path(), "texts/en_US.lang");

    let model = WordListModel::from_words([
        "welcome", "explorer", "let's", "learn", "about", "renewable", "energy", "today",
        "solar", "panels", "turn", "sunlight", "into", "electricity", "for", "the", "wind",
        "turbines", "spin", "when", "blows", "across", "hills",
    ]);
    let dictionary = CustomDictionary::in_memory(["village"]);

    let report = perform_spell_check(tmp.path(), &model, &dictionary).unwrap();
    assert_eq!(report.statistics.misspelled_count, 0);
    assert_eq!(report.statistics.custom_words_used, 1);
    assert_eq!(report.statistics.accuracy_percentage, 100.0);
    assert_eq!(report.quality_assessment.level, "Excellent");
    assert_eq!(report.error_count(), 0);
    assert_eq!(report.analyzed_file.name, "en_US.lang");
}
