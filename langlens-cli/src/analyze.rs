use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use langlens::{
    AnalysisReport, AnalyzedFile, CustomDictionary, SpellCheckReport, WordListModel,
    perform_analysis_with, perform_spell_check_with,
};
use langlens_cli::config::Config;
use langlens_cli::validation::{Target, validate_dir_path};

fn new_spinner(message: String) -> ProgressBar {
    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress_bar.set_message(message);
    progress_bar
}

/// Resolves the directory an analysis command works on.
pub fn resolve_root(config: &Config, target: &Target) -> Result<PathBuf, String> {
    match target {
        Target::Directory(dir) => {
            validate_dir_path(dir)?;
            Ok(dir.clone())
        }
        Target::Unpacked(id) => {
            let store = config.open_store()?;
            store.unpacked_root(*id).map_err(|e| e.to_string())
        }
    }
}

pub fn run_analyze_command(
    config: &Config,
    target: Target,
    json_output: bool,
) -> Result<(), String> {
    let root = resolve_root(config, &target)?;
    let progress_bar = new_spinner(format!("Analyzing {}...", root.display()));

    let report = match perform_analysis_with(&root, &config.analysis_options()) {
        Ok(report) => report,
        Err(failure) => {
            progress_bar.finish_with_message("❌ Analysis failed");
            return Err(failure.to_string());
        }
    };
    progress_bar.finish_with_message(format!("✅ Analyzed {}", report.analyzed_file.path));

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?
        );
    } else {
        print_analysis(&report);
    }
    Ok(())
}

pub fn run_spellcheck_command(
    config: &Config,
    target: Target,
    json_output: bool,
) -> Result<(), String> {
    let root = resolve_root(config, &target)?;
    let model = match &config.dictionary_path {
        Some(path) => WordListModel::from_file(path)
            .map_err(|e| format!("Cannot load word list {}: {}", path.display(), e))?,
        None => WordListModel::english(),
    };
    let dictionary =
        CustomDictionary::load_or_seed(config.custom_dictionary()).map_err(|e| e.to_string())?;

    let progress_bar = new_spinner(format!("Spell checking {}...", root.display()));
    let report =
        match perform_spell_check_with(&root, &model, &dictionary, &config.analysis_options()) {
            Ok(report) => report,
            Err(failure) => {
                progress_bar.finish_with_message("❌ Spell check failed");
                return Err(failure.to_string());
            }
        };
    progress_bar.finish_with_message(format!(
        "✅ Checked {} ({} potential error(s))",
        report.analyzed_file.path,
        report.error_count()
    ));

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?
        );
    } else {
        print_spell_check(&report);
    }
    Ok(())
}

fn print_file(file: &AnalyzedFile) {
    println!("File: {} [{}]", file.path, file.locale);
    println!(
        "  Entries: {} total, {} educational ({:.1}%)",
        file.total_entries, file.educational_entries, file.educational_percentage
    );
    println!(
        "  Extracted: {} words, {} chars ({} .lang file(s) found)",
        file.extracted_text_words, file.extracted_text_chars, file.total_files_found
    );
}

fn print_analysis(report: &AnalysisReport) {
    let m = &report.metrics;
    println!("=== Readability ===");
    print_file(&report.analyzed_file);
    if let Some(warning) = &report.warning {
        println!("Warning: {}", warning);
    }
    println!();
    println!("Reading level: {}", m.reading_level);
    println!("Target age: {}", m.target_age_label);
    println!(
        "Flesch Reading Ease: {} ({})",
        m.flesch_reading_ease, m.ease_interpretation
    );
    println!("Flesch-Kincaid Grade: {}", m.flesch_kincaid_grade);
    println!("Gunning Fog: {}", m.gunning_fog);
    println!("SMOG: {}", m.smog_index);
    println!("Automated Readability Index: {}", m.automated_readability_index);
    println!("Coleman-Liau: {}", m.coleman_liau_index);
    println!("Linsear Write: {}", m.linsear_write_formula);
    println!("Dale-Chall: {}", m.dale_chall_readability_score);
    println!();
    println!(
        "Words: {}  Sentences: {}  Paragraphs: {}  Syllables: {}",
        m.word_count, m.sentence_count, m.paragraph_count, m.syllable_count
    );
    println!(
        "Avg sentence length: {}  Avg syllables/word: {}  Difficult words: {}",
        m.avg_sentence_length, m.avg_syllables_per_word, m.difficult_words
    );
    println!("Reading time: {} min", m.reading_time_minutes);
    println!();
    println!("Sample:");
    println!("{}", report.sample_text);
}

fn print_spell_check(report: &SpellCheckReport) {
    let stats = &report.statistics;
    println!("=== Spelling ===");
    print_file(&report.analyzed_file);
    if let Some(warning) = &report.warning {
        println!("Warning: {}", warning);
    }
    println!();
    println!("{}", report.quality_assessment.description);
    println!(
        "Unique words: {}  Misspelled: {}  Accuracy: {}%",
        stats.total_unique_words, stats.misspelled_count, stats.accuracy_percentage
    );
    println!(
        "Custom dictionary: {} word(s), {} used",
        stats.custom_dictionary_size, stats.custom_words_used
    );

    for (title, errors) in [
        ("Common errors", &report.common_errors),
        ("Unique errors", &report.unique_errors),
    ] {
        if errors.is_empty() {
            continue;
        }
        println!();
        println!("{}:", title);
        for error in errors {
            let suggestions = if error.suggestions.is_empty() {
                "no suggestions".to_string()
            } else {
                error.suggestions.join(", ")
            };
            println!("  {} (x{}) -> {}", error.word, error.context_usage, suggestions);
        }
    }
}
