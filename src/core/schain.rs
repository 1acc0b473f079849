//! Supply chain forms sent to the endpoint, the structured ORTB object
//! and the compact `ver,complete!node!node` string

use crate::core::openrtb::request::{SupplyChain, SupplyChainNode};
use url::form_urlencoded;

fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn node_field(node: &SupplyChainNode, field: &str) -> Option<String> {
    let value = match field {
        "asi" => node.asi.clone(),
        "sid" => node.sid.clone(),
        "hp" => node.hp.filter(|hp| *hp != 0).map(|hp| hp.to_string()),
        "rid" => node.rid.clone(),
        "name" => node.name.clone(),
        "domain" => node.domain.clone(),
        "ext" => node.ext.as_ref().map(|ext| ext.to_string()),
        _ => None,
    };

    value.filter(|value| !value.is_empty())
}

/// Copies the chain keeping only the listed node fields
pub fn to_wire(chain: &SupplyChain, fields: &[&str]) -> SupplyChain {
    let keep = |field: &str| fields.contains(&field);

    let nodes = chain
        .nodes
        .iter()
        .map(|node| SupplyChainNode {
            asi: node.asi.clone().filter(|_| keep("asi")),
            sid: node.sid.clone().filter(|_| keep("sid")),
            hp: node.hp.filter(|_| keep("hp")),
            rid: node.rid.clone().filter(|_| keep("rid")),
            name: node.name.clone().filter(|_| keep("name")),
            domain: node.domain.clone().filter(|_| keep("domain")),
            ext: node.ext.clone().filter(|_| keep("ext")),
        })
        .collect();

    SupplyChain {
        ver: chain.ver.clone(),
        complete: chain.complete,
        nodes,
        ext: chain.ext.clone(),
    }
}

/// Serializes the chain as `ver,complete!f1,f2,...!...`. Values are url
/// encoded, absent or falsy values are left empty
pub fn serialize(chain: &SupplyChain, fields: &[&str]) -> String {
    let nodes: Vec<String> = chain
        .nodes
        .iter()
        .map(|node| {
            fields
                .iter()
                .map(|field| {
                    node_field(node, field)
                        .map(|value| encode_component(&value))
                        .unwrap_or_default()
                })
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();

    format!("{},{}!{}", chain.ver, chain.complete, nodes.join("!"))
}
