use gm_session::Intent;

use super::{Context, print_json};

pub fn run(ctx: &Context, intent: &str, text: &str) -> Result<(), String> {
    let value: serde_json::Value =
        serde_json::from_str(intent).map_err(|e| format!("intent is not valid JSON: {e}"))?;
    let Some(intent) = Intent::from_value(&value).map_err(|e| e.to_string())? else {
        println!("null");
        return Ok(());
    };

    let result = ctx
        .resolver()
        .resolve_active(&intent, text)
        .map_err(|e| e.to_string())?;
    print_json(&result)
}
