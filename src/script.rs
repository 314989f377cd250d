//! Build script assembly
//!
//! Concatenates the translator declarations, the global variable block and
//! every rendered rule into one makefile document. Accelerated records come
//! first, then direct records; discovery order is preserved inside each
//! bucket and nothing is resorted, so an unchanged input set always
//! assembles to byte-identical text.
//!
//! The assembler performs no filesystem I/O; writing the document is the
//! caller's job.

use crate::config::BuildConfig;
use crate::discovery::ModelFile;
use crate::rules::RuleRecord;
use std::fmt::Write;

/// Assembles the complete build-script text.
///
/// `files` is the full discovered set in discovery order; `accelerated` and
/// `direct` are the synthesized records of the two buckets, also in
/// discovery order.
pub fn assemble(
    config: &BuildConfig,
    files: &[ModelFile],
    accelerated: &[RuleRecord],
    direct: &[RuleRecord],
) -> String {
    let mut script = String::new();

    script.push_str(&translator_block(config));
    script.push_str(&variable_block(files, accelerated, direct));

    for record in accelerated {
        script.push_str(&record.render());
    }
    for record in direct {
        script.push_str(&record.render());
    }

    script
}

/// Declares which translator binary the rules invoke and with which flags
fn translator_block(config: &BuildConfig) -> String {
    let mut block = String::new();
    let _ = writeln!(
        block,
        "MOD2CPP_BINARY_PATH = {}",
        config.translator_binary_value()
    );
    let _ = writeln!(block, "MOD2CPP_BINARY_FLAG = {}", config.translator_flags());
    block
}

/// Global lists: every model file, the objects produced from the vectorizing
/// intermediate, and the objects produced from general source.
///
/// The general-object list carries direct records first and then the general
/// objects of accelerated records, unconditionally on which route was
/// configured.
fn variable_block(files: &[ModelFile], accelerated: &[RuleRecord], direct: &[RuleRecord]) -> String {
    let mod_files: Vec<&str> = files.iter().map(|f| f.file_name()).collect();

    let ispc_objs: Vec<String> = accelerated
        .iter()
        .filter_map(|r| r.accelerated_object())
        .map(|o| format!("$(MOD_OBJS_DIR)/{}", o))
        .collect();

    let cpp_objs: Vec<String> = direct
        .iter()
        .chain(accelerated.iter())
        .map(|r| format!("$(MOD_OBJS_DIR)/{}", r.generic_object()))
        .collect();

    format!(
        "\n\
         MOD_FILES = {}\n\
         PRODUCED_OBJS_FROM_ISPC = {}\n\
         PRODUCED_OBJS_FROM_CPP = {}\n\
         \n",
        mod_files.join(" "),
        ispc_objs.join(" "),
        cpp_objs.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HostBackend, TranslatorKind};
    use std::path::PathBuf;

    fn model(path: &str) -> ModelFile {
        ModelFile::new(PathBuf::from(path)).unwrap()
    }

    fn config() -> BuildConfig {
        let mut config =
            BuildConfig::new(PathBuf::from("/opt/modforge"), PathBuf::from("/mods"));
        config.translator = TranslatorKind::Nmodl;
        config.host_backend = HostBackend::Ispc;
        config
    }

    #[test]
    fn test_assemble_scenario_with_marker_split() {
        // foo carries the marker (direct), bar does not (accelerated)
        let foo = model("/mods/foo.mod");
        let bar = model("/mods/bar.mod");
        let files = vec![bar.clone(), foo.clone()];

        let accelerated = vec![RuleRecord::accelerated(&bar)];
        let direct = vec![RuleRecord::direct(&foo)];

        let script = assemble(&config(), &files, &accelerated, &direct);

        assert!(script.contains("MOD_FILES = bar.mod foo.mod"));
        assert!(script.contains("PRODUCED_OBJS_FROM_ISPC = $(MOD_OBJS_DIR)/bar.obj"));
        assert!(script.contains(
            "PRODUCED_OBJS_FROM_CPP = $(MOD_OBJS_DIR)/foo.o $(MOD_OBJS_DIR)/bar.o"
        ));
        assert!(script.contains("$(MOD_TO_CPP_DIR)/bar.ispc: /mods/bar.mod"));
        assert!(script.contains("$(MOD_TO_CPP_DIR)/foo.cpp: /mods/foo.mod"));
    }

    #[test]
    fn test_assemble_translator_declarations_first() {
        let files = vec![model("/mods/hh.mod")];
        let direct = vec![RuleRecord::direct(&files[0])];
        let script = assemble(&config(), &files, &[], &direct);

        let first_line = script.lines().next().unwrap();
        assert_eq!(first_line, "MOD2CPP_BINARY_PATH = $(NMODL_COMPILER)");
        assert!(script
            .lines()
            .nth(1)
            .unwrap()
            .starts_with("MOD2CPP_BINARY_FLAG = host --ispc"));
    }

    #[test]
    fn test_assemble_accelerated_rules_before_direct() {
        let bar = model("/mods/bar.mod");
        let foo = model("/mods/foo.mod");
        let script = assemble(
            &config(),
            &[bar.clone(), foo.clone()],
            &[RuleRecord::accelerated(&bar)],
            &[RuleRecord::direct(&foo)],
        );

        let bar_pos = script.find("bar.ispc:").unwrap();
        let foo_pos = script.find("foo.cpp: /mods/foo.mod").unwrap();
        assert!(bar_pos < foo_pos);
    }

    #[test]
    fn test_assemble_no_acceleration_leaves_ispc_list_empty() {
        let files = vec![model("/mods/hh.mod"), model("/mods/netstim.mod")];
        let direct: Vec<_> = files.iter().map(RuleRecord::direct).collect();

        let script = assemble(&config(), &files, &[], &direct);

        assert!(script.contains("PRODUCED_OBJS_FROM_ISPC = \n"));
        assert!(script.contains(
            "PRODUCED_OBJS_FROM_CPP = $(MOD_OBJS_DIR)/hh.o $(MOD_OBJS_DIR)/netstim.o"
        ));
        assert!(!script.contains(".ispc:"));
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let bar = model("/mods/bar.mod");
        let foo = model("/mods/foo.mod");
        let files = vec![bar.clone(), foo.clone()];
        let accelerated = vec![RuleRecord::accelerated(&bar)];
        let direct = vec![RuleRecord::direct(&foo)];

        let first = assemble(&config(), &files, &accelerated, &direct);
        let second = assemble(&config(), &files, &accelerated, &direct);
        assert_eq!(first, second);
    }

    #[test]
    fn test_assemble_rule_block_count_matches_file_count() {
        let models: Vec<_> = ["/mods/a.mod", "/mods/b.mod", "/mods/c.mod"]
            .iter()
            .map(|p| model(p))
            .collect();
        let accelerated = vec![
            RuleRecord::accelerated(&models[0]),
            RuleRecord::accelerated(&models[1]),
        ];
        let direct = vec![RuleRecord::direct(&models[2])];

        let script = assemble(&config(), &models, &accelerated, &direct);

        let translate_rules = script
            .matches("$(info Generating for ")
            .count();
        assert_eq!(translate_rules, models.len());
    }

    #[test]
    fn test_assemble_empty_input_set() {
        let script = assemble(&config(), &[], &[], &[]);
        assert!(script.contains("MOD_FILES = \n"));
        assert!(!script.contains("$(info"));
    }
}
