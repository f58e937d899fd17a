use crate::{ControlKind, Item, ItemKind, SurveyControl};

/// Default validator: checks that an item has been answered completely.
///
/// # Returns
/// * `Ok(())` if the respondent may move on from this item
/// * `Err(message)` describing the first missing or invalid answer
pub fn validate_item(item: &Item) -> Result<(), String> {
    match item.kind() {
        ItemKind::Question { control } => validate_control(control),
        ItemKind::AcrExample { example } => {
            if let Some(position) = example.audios.iter().position(|audio| audio.score.is_none()) {
                return Err(format!(
                    "Please rate every sample ({} is not rated)",
                    example.audios[position].filename
                ));
            }
            validate_fields(&example.fields)
        }
        ItemKind::AbExample { example } => match example.choice {
            None => Err("Please choose the sample you prefer".to_string()),
            Some(choice) if choice >= example.audios.len() => Err(format!(
                "Choice {} does not match any of the {} samples",
                choice + 1,
                example.audios.len()
            )),
            Some(_) => validate_fields(&example.fields),
        },
        ItemKind::Training { example } => validate_fields(&example.fields),
    }
}

fn validate_fields(fields: &[SurveyControl]) -> Result<(), String> {
    fields.iter().try_for_each(validate_control)
}

/// Checks a single control's answer against its kind and options.
pub fn validate_control(control: &SurveyControl) -> Result<(), String> {
    if control.kind == ControlKind::Description {
        return Ok(());
    }

    let Some(answer) = control.answer() else {
        if control.required {
            return Err(format!("{} is required", control.question));
        }
        return Ok(());
    };

    match control.kind {
        ControlKind::Radio => {
            if !control.options.is_empty() && !control.options.iter().any(|o| o == answer) {
                return Err(format!("'{answer}' is not an option for {}", control.question));
            }
        }
        ControlKind::Checkbox => {
            if let Some(unknown) = control
                .checked()
                .find(|entry| !control.options.iter().any(|o| o == entry))
            {
                return Err(format!("'{unknown}' is not an option for {}", control.question));
            }
        }
        ControlKind::Slider => {
            if answer.parse::<f64>().is_err() {
                return Err(format!("{} must be a number", control.question));
            }
        }
        ControlKind::Text | ControlKind::Description => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AbExample, AcrExample, AudioFile, TrainingExample};

    fn scored(filename: &str, score: Option<f64>) -> AudioFile {
        AudioFile {
            score,
            ..AudioFile::new(filename, format!("/audio/{filename}"))
        }
    }

    #[test]
    fn required_question_needs_answer() {
        let item = Item::question("q", "Name", SurveyControl::text("Your name?"));
        assert_eq!(validate_item(&item).unwrap_err(), "Your name? is required");

        let item = Item::question("q", "Name", SurveyControl::text("Your name?").answered("  "));
        assert!(validate_item(&item).is_err());

        let item = Item::question("q", "Name", SurveyControl::text("Your name?").answered("Ada"));
        assert!(validate_item(&item).is_ok());
    }

    #[test]
    fn optional_and_description_controls_pass_unanswered() {
        let item = Item::question("q", "Notes", SurveyControl::text("Anything else?").optional());
        assert!(validate_item(&item).is_ok());

        let item = Item::question(
            "d",
            "Intro",
            SurveyControl::new(ControlKind::Description, "Put your headphones on."),
        );
        assert!(validate_item(&item).is_ok());
    }

    #[test]
    fn radio_answer_must_be_an_option() {
        let control = SurveyControl::radio("Hearing loss?", ["Yes", "No"]);
        assert!(validate_control(&control.clone().answered("No")).is_ok());
        assert_eq!(
            validate_control(&control.answered("Maybe")).unwrap_err(),
            "'Maybe' is not an option for Hearing loss?"
        );
    }

    #[test]
    fn checkbox_entries_must_be_options() {
        let control = SurveyControl::new(ControlKind::Checkbox, "Devices")
            .with_options(["Speakers", "Headphones", "Earbuds"]);
        assert!(validate_control(&control.clone().answered("Speakers, Earbuds")).is_ok());
        assert!(validate_control(&control.answered("Speakers,Phone")).is_err());
    }

    #[test]
    fn slider_must_be_numeric() {
        let control = SurveyControl::new(ControlKind::Slider, "Loudness");
        assert!(validate_control(&control.clone().answered("42.5")).is_ok());
        assert_eq!(
            validate_control(&control.answered("loud")).unwrap_err(),
            "Loudness must be a number"
        );
    }

    #[test]
    fn acr_example_needs_every_score() {
        let mut example = AcrExample {
            audios: vec![scored("a.wav", Some(4.0)), scored("b.wav", None)],
            ..AcrExample::default()
        };
        let item = Item::new("e", "Example 1", ItemKind::AcrExample { example: example.clone() });
        assert!(validate_item(&item).unwrap_err().contains("b.wav"));

        example.audios[1].score = Some(2.0);
        example.fields.push(SurveyControl::text("Describe the artefacts"));
        let item = Item::new("e", "Example 1", ItemKind::AcrExample { example });
        assert_eq!(
            validate_item(&item).unwrap_err(),
            "Describe the artefacts is required"
        );
    }

    #[test]
    fn ab_example_needs_valid_choice() {
        let example = AbExample {
            audios: vec![scored("a.wav", None), scored("b.wav", None)],
            ..AbExample::default()
        };
        let item = Item::new("e", "Pair", ItemKind::AbExample { example: example.clone() });
        assert!(validate_item(&item).is_err());

        let item = Item::new(
            "e",
            "Pair",
            ItemKind::AbExample {
                example: AbExample {
                    choice: Some(2),
                    ..example.clone()
                },
            },
        );
        assert!(validate_item(&item).unwrap_err().starts_with("Choice 3"));

        let item = Item::new(
            "e",
            "Pair",
            ItemKind::AbExample {
                example: AbExample {
                    choice: Some(1),
                    ..example
                },
            },
        );
        assert!(validate_item(&item).is_ok());
    }

    #[test]
    fn training_checks_fields_only() {
        let item = Item::new(
            "t",
            "Training",
            ItemKind::Training {
                example: TrainingExample {
                    audios: vec![scored("a.wav", None)],
                    ..TrainingExample::default()
                },
            },
        );
        assert!(validate_item(&item).is_ok());
    }
}
