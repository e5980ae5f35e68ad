//! Save-file text format
//!
//! One `KEY: value` pair per line, keys in uppercase snake case. List
//! fields are comma-joined; an empty list is an empty value.

use crate::character::record::{EQUIPMENT_FIELDS, LIST_FIELDS, REQUIRED_FIELDS};
use crate::data::record::{
    FIELD_SEPARATOR, FieldValue, Record, field_name, file_key, is_list_entry, join_list, split_field,
    split_list,
};
use crate::error::{GameError, Result};

fn is_list_field(field: &str) -> bool {
    LIST_FIELDS.contains(&field) || EQUIPMENT_FIELDS.contains(&field)
}

fn is_known_field(field: &str) -> bool {
    REQUIRED_FIELDS.contains(&field) || EQUIPMENT_FIELDS.contains(&field)
}

/// Render a record as save text. Fails with `InvalidSaveData` on any value
/// that `decode` would not read back unchanged.
pub fn encode(record: &Record) -> Result<String> {
    let unwritable = |field: &str, value: &str| {
        GameError::InvalidSaveData(format!(
            "{} value '{}' cannot be saved",
            file_key(field),
            value.escape_debug()
        ))
    };

    let mut out = String::new();
    for (field, value) in record.iter() {
        let value = match value {
            FieldValue::Scalar(text) => {
                if text.trim() != text || text.contains(['\n', '\r']) {
                    return Err(unwritable(field, text));
                }
                text.clone()
            }
            FieldValue::List(items) => {
                if let Some(bad) = items.iter().find(|item| !is_list_entry(item)) {
                    return Err(unwritable(field, bad));
                }
                join_list(items)
            }
        };
        out.push_str(&file_key(field));
        out.push_str(FIELD_SEPARATOR);
        out.push_str(&value);
        out.push('\n');
    }
    Ok(out)
}

/// Parse save text into a record. Only checks line shape and key names;
/// field contents are checked by `Character::from_record`.
pub fn decode(text: &str) -> Result<Record> {
    let mut record = Record::new();

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let (key, value) = match split_field(line) {
            Some(pair) => pair,
            // `INVENTORY:` with nothing after it
            None => match line.trim().strip_suffix(':') {
                Some(key) if is_list_field(&field_name(key)) => (key, ""),
                _ => {
                    return Err(GameError::InvalidSaveData(format!(
                        "Line missing ': ' separator: '{}'",
                        line
                    )));
                }
            },
        };

        let field = field_name(key);
        if key != file_key(&field) || !is_known_field(&field) {
            return Err(GameError::InvalidSaveData(format!("Unknown save field: {}", key)));
        }
        if record.contains(&field) {
            return Err(GameError::InvalidSaveData(format!("Duplicate save field: {}", key)));
        }

        if is_list_field(&field) {
            record.insert_list(&field, split_list(value));
        } else {
            record.insert_scalar(&field, value);
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Character, CharacterClass};

    #[test]
    fn test_encode_layout() {
        let hero = Character::new("Aria", CharacterClass::Mage);
        let text = encode(&hero.to_record()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "NAME: Aria");
        assert_eq!(lines[1], "CLASS: Mage");
        assert!(lines.contains(&"GOLD: 100"));
        assert!(lines.contains(&"INVENTORY: "));
        assert!(lines.contains(&"EQUIPPED_WEAPON: "));
    }

    #[test]
    fn test_encode_refuses_values_that_would_not_reload() {
        let mut hero = Character::new("Aria", CharacterClass::Mage);
        hero.inventory = crate::inventory::Inventory::from_items(vec!["a,b".into(), "".into()]);
        let err = encode(&hero.to_record()).unwrap_err();
        assert!(matches!(err, GameError::InvalidSaveData(ref m) if m.contains("INVENTORY")));

        let mut hero = Character::new("Aria\nGOLD: 999999", CharacterClass::Mage);
        assert!(matches!(encode(&hero.to_record()), Err(GameError::InvalidSaveData(_))));

        hero.name = "Sir Aria, the: Wise".into();
        let record = decode(&encode(&hero.to_record()).unwrap()).unwrap();
        assert_eq!(Character::from_record(&record).unwrap(), hero);
    }

    #[test]
    fn test_bare_colon_is_empty_list() {
        let record = decode("INVENTORY:\nACTIVE_QUESTS: a,b\n").unwrap();
        assert_eq!(record.list("inventory"), Some(&[][..]));
        assert_eq!(record.list("active_quests").unwrap(), &["a".to_string(), "b".to_string()]);

        assert!(matches!(decode("NAME:\n"), Err(GameError::InvalidSaveData(_))));
    }

    #[test]
    fn test_unknown_and_malformed_keys() {
        let err = decode("NAME: Aria\nFAVORITE_COLOR: blue\n").unwrap_err();
        assert!(err.to_string().contains("Unknown save field: FAVORITE_COLOR"));

        assert!(matches!(decode("name: Aria\n"), Err(GameError::InvalidSaveData(_))));
        assert!(matches!(decode("NAME Aria\n"), Err(GameError::InvalidSaveData(_))));
        assert!(matches!(decode("GOLD: 1\nGOLD: 2\n"), Err(GameError::InvalidSaveData(_))));
    }
}
