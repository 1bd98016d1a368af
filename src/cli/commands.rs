use serde_json::json;

use dbxtf::{DbxError, PairId, ResourceData, generate_import};

use super::{PackArgs, UnpackArgs};

pub fn pack(args: PackArgs) -> Result<String, DbxError> {
    let pair = PairId::new(args.names.left_name, args.names.right_name);
    let d = ResourceData::from_state([
        (pair.left().to_string(), json!(args.left)),
        (pair.right().to_string(), json!(args.right)),
    ]);
    let id = pair.encode(&d)?;

    Ok(match args.to {
        Some(to) => generate_import(&to, &id),
        None => id,
    })
}

pub fn unpack(args: UnpackArgs) -> Result<String, DbxError> {
    let pair = PairId::new(args.names.left_name, args.names.right_name);
    let mut d = ResourceData::with_id(args.id);
    pair.unpack(&mut d)?;
    Ok(serde_json::to_string_pretty(d.attributes())?)
}
