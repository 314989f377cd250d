//! Rule synthesis
//!
//! Turns each classified model file into a [`RuleRecord`], the tuple of
//! artifact names the makefile templates need, and renders the record into
//! rule text. Name derivation is a pure extension substitution on the model's
//! base name, so identical inputs always produce identical rules and distinct
//! base names never collide. All branching happens when a record is built;
//! the templates themselves contain no conditionals.
//!
//! An accelerated record renders a four-rule chain (translate to the
//! vectorizing intermediate, compile it, declare the general source dependent
//! on it, compile the general source); a direct record renders a two-rule
//! chain (translate with the configured flags, compile).

use crate::discovery::ModelFile;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Filenames required by the rule templates for one model file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleRecord {
    /// Five artifacts: model, intermediate vector source, vector object,
    /// general source, general object
    Accelerated {
        mod_path: PathBuf,
        ispc_file: String,
        obj_file: String,
        cpp_file: String,
        o_file: String,
    },
    /// Three artifacts: model, general source, general object
    Direct {
        mod_path: PathBuf,
        cpp_file: String,
        o_file: String,
    },
}

impl RuleRecord {
    pub fn accelerated(model: &ModelFile) -> Self {
        let stem = model.stem();
        RuleRecord::Accelerated {
            mod_path: model.path().to_path_buf(),
            ispc_file: format!("{}.ispc", stem),
            obj_file: format!("{}.obj", stem),
            cpp_file: format!("{}.cpp", stem),
            o_file: format!("{}.o", stem),
        }
    }

    pub fn direct(model: &ModelFile) -> Self {
        let stem = model.stem();
        RuleRecord::Direct {
            mod_path: model.path().to_path_buf(),
            cpp_file: format!("{}.cpp", stem),
            o_file: format!("{}.o", stem),
        }
    }

    /// Object produced from the general source; present for every record
    pub fn generic_object(&self) -> &str {
        match self {
            RuleRecord::Accelerated { o_file, .. } | RuleRecord::Direct { o_file, .. } => o_file,
        }
    }

    /// Object produced from the vectorizing intermediate, if any
    pub fn accelerated_object(&self) -> Option<&str> {
        match self {
            RuleRecord::Accelerated { obj_file, .. } => Some(obj_file),
            RuleRecord::Direct { .. } => None,
        }
    }

    /// Renders the dependency-rule block for this record
    pub fn render(&self) -> String {
        match self {
            RuleRecord::Accelerated {
                mod_path,
                ispc_file,
                obj_file,
                cpp_file,
                o_file,
            } => {
                let mod_file = mod_path.display();
                format!(
                    "\n\
                     $(MOD_TO_CPP_DIR)/{ispc_file}: {mod_file}\n\
                     \t$(info Generating for {mod_file})\n\
                     \t$(MOD2CPP_ENV_VAR) $(MOD2CPP_BINARY_PATH) $< -o $(MOD_TO_CPP_DIR) $(MOD2CPP_BINARY_FLAG)\n\
                     \n\
                     $(MOD_OBJS_DIR)/{obj_file}: $(MOD_TO_CPP_DIR)/{ispc_file}\n\
                     \t$(ISPC_COMPILE_CMD) $< -o $@\n\
                     \n\
                     $(MOD_TO_CPP_DIR)/{cpp_file}: $(MOD_TO_CPP_DIR)/{ispc_file}\n\
                     \n\
                     $(MOD_OBJS_DIR)/{o_file}: $(MOD_TO_CPP_DIR)/{cpp_file}\n\
                     \t$(CXX_COMPILE_CMD) -c $< -o $@\n\
                     \n"
                )
            }
            RuleRecord::Direct {
                mod_path,
                cpp_file,
                o_file,
            } => {
                let mod_file = mod_path.display();
                format!(
                    "\n\
                     $(MOD_TO_CPP_DIR)/{cpp_file}: {mod_file}\n\
                     \t$(info Generating for {mod_file})\n\
                     \t$(MOD2CPP_ENV_VAR) $(MOD2CPP_BINARY_PATH) $< -o $(MOD_TO_CPP_DIR) $(NMODL_FLAGS_C)\n\
                     \n\
                     $(MOD_OBJS_DIR)/{o_file}: $(MOD_TO_CPP_DIR)/{cpp_file} $(KINDERIV_H_PATH)\n\
                     \t$(CXX_COMPILE_CMD) -c $< -o $@\n\
                     \n"
                )
            }
        }
    }
}
