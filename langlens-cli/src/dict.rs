use langlens::CustomDictionary;
use langlens_cli::config::Config;
use langlens_cli::validation::validate_dictionary_word;

fn load(config: &Config) -> Result<CustomDictionary, String> {
    CustomDictionary::load_or_seed(config.custom_dictionary()).map_err(|e| e.to_string())
}

pub fn run_dict_add_command(config: &Config, word: &str) -> Result<(), String> {
    validate_dictionary_word(word)?;
    let mut dictionary = load(config)?;
    let added = dictionary.add_word(word).map_err(|e| e.to_string())?;
    println!(
        "✅ Added '{}' to the custom dictionary ({} words)",
        added,
        dictionary.len()
    );
    Ok(())
}

pub fn run_dict_list_command(config: &Config) -> Result<(), String> {
    let dictionary = load(config)?;
    for word in dictionary.words() {
        println!("{}", word);
    }
    eprintln!(
        "{} word(s) in {}",
        dictionary.len(),
        config.custom_dictionary().display()
    );
    Ok(())
}
