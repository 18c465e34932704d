use crate::lexer::{Lexer, Token};
use crate::parser::{load_simulation, Context};
use crate::{Effect, Error};

/// Keyword introducing the simulation file of an effect.
///
/// The spelling is part of the file format.
pub const SIMULATION_KEYWORD: &str = "simuation";

/// Reads the body of an effect block, starting at the opening brace.
///
/// Repeated `material` or `simuation` lines overwrite earlier ones.
pub(crate) fn read_effect(p: &mut Lexer, name: &str, cx: &Context) -> Result<Effect, Error> {
    let mut effect = Effect::new(name);
    p.expect_token("{")?;
    loop {
        let (token, span) = p.expect_any("`}`")?;
        if token == Token::RCurly {
            break;
        }
        match token.text() {
            SIMULATION_KEYWORD => {
                let (file, _) = p.expect_any("simulation file name")?;
                effect.simulation = load_simulation(file.text(), cx.options)?;
            }
            "material" => {
                let (material, _) = p.expect_any("material name")?;
                effect.material = Some(cx.materials.find_material(material.text()));
            }
            _ => return Err(p.unexpected(&span, "`material`, `simuation` or `}`", token)),
        }
    }
    Ok(effect)
}
