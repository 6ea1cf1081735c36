// src/utils/share.rs

use serde::Serialize;
use url::Url;

const QR_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// What the browser hands to the native share sheet, or copies to the
/// clipboard when sharing is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,

    /// Suggested file name when an image is attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

pub fn persona_share(stage_name: &str, public_url: &str) -> SharePayload {
    SharePayload {
        title: "Min Nestor Persona".to_string(),
        text: format!("Mitt Nestor rock-namn är {}! #Nestor #Rock", stage_name),
        url: public_url.to_string(),
        file_name: None,
    }
}

pub fn album_share(album_title: &str, public_url: &str) -> SharePayload {
    SharePayload {
        title: format!("Nestor Album: {}", album_title),
        text: format!(
            "Kolla in mitt nya Nestor-omslag för \"{}\"! Skapat i Nestor Fan Portal. #Nestor #Rock #Falköping",
            album_title
        ),
        url: public_url.to_string(),
        file_name: Some(format!("{}-album.png", slugify(album_title))),
    }
}

/// Share payload for the portal itself, plus a QR code image address.
#[derive(Debug, Clone, Serialize)]
pub struct SiteShare {
    #[serde(flatten)]
    pub payload: SharePayload,
    pub qr_code_url: String,
}

pub fn site_share(public_url: &str) -> Result<SiteShare, url::ParseError> {
    let mut qr = Url::parse(QR_SERVICE)?;
    qr.query_pairs_mut()
        .append_pair("size", "400x400")
        .append_pair("data", public_url)
        .append_pair("ecc", "L")
        .append_pair("margin", "1");

    Ok(SiteShare {
        payload: SharePayload {
            title: "Nestor Fan Portal".to_string(),
            text: "Sprid rocken! Kids in a Ghost Town Experience".to_string(),
            url: public_url.to_string(),
            file_name: None,
        },
        qr_code_url: qr.into(),
    })
}

/// Lowercases and joins whitespace-separated words with dashes.
pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
