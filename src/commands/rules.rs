use clap::Args;
use serde::Serialize;

use hmm_update::migrate::rules::{
    self, RenameRule, ANGLE_CONVERSION, CONVENTION_MARKERS, DEGREE_CALLS, HANDED_FUNCTIONS,
    MIGRATED_TYPES, PROJECTION_FUNCTIONS,
};

use super::CmdResult;

#[derive(Args)]
pub struct RulesArgs {}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RulesOutput {
    #[serde(rename = "rules")]
    Rules {
        type_rules: &'static [RenameRule],
        function_rules: &'static [RenameRule],
        handed_functions: &'static [&'static str],
        projection_functions: &'static [&'static str],
        convention_markers: &'static [&'static str],
        degree_calls: &'static [&'static str],
        angle_conversion: &'static str,
        migrated_types: &'static [&'static str],
    },
}

pub fn run(_args: RulesArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<RulesOutput> {
    Ok((
        RulesOutput::Rules {
            type_rules: rules::TYPE_RULES,
            function_rules: rules::FUNCTION_RULES,
            handed_functions: HANDED_FUNCTIONS,
            projection_functions: PROJECTION_FUNCTIONS,
            convention_markers: CONVENTION_MARKERS,
            degree_calls: DEGREE_CALLS,
            angle_conversion: ANGLE_CONVERSION,
            migrated_types: MIGRATED_TYPES,
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_output_lists_tables_in_order() {
        let (output, exit_code) = run(RulesArgs {}, &crate::commands::GlobalArgs {}).unwrap();
        let value = serde_json::to_value(output).unwrap();

        assert_eq!(exit_code, 0);
        assert_eq!(value["command"], "rules");
        assert_eq!(value["type_rules"][0]["from"], "hmm_");
        assert_eq!(value["function_rules"][0]["from"], "Vec");
        assert_eq!(value["function_rules"][0]["effect"]["type"], "normalize_dimension");
        assert_eq!(value["angle_conversion"], "HMM_AngleDeg");
    }
}
