/// Characters that fit the GSM 03.38 default alphabet (including the basic
/// extension table reachable through the escape code).
const CHARACTERS: &str = "\n\x0c\r !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_abcdefghijklmnopqrstuvwxyz{|}~\u{a0}¡£¤¥§¿ÄÅÆÉÑÖØÜßàäåæçèéìñòöøùüΓΔΘΛΞΠΣΦΨΩ€";

/// Returns `true` if `text` can be sent as a plain `text` SMS without switching
/// to the `unicode` message type.
pub fn is_gsm7(text: &str) -> bool {
    text.chars().all(|c| CHARACTERS.contains(c))
}
