use sealink_crypto::{Cipher, KeyManager};
use sealink_link::{
    EncryptedPackage, FileMetadata, build, deserialize_package, fragment_of, from_url_safe_text,
    parse, serialize_package, to_url_safe_text,
};

#[test]
fn sealed_file_survives_the_link() {
    let keys = KeyManager::system();
    let cipher = Cipher::system();

    let key = keys.generate().unwrap();
    let plaintext = b"0123456789".to_vec();
    let sealed = cipher.encrypt(&plaintext, &key).unwrap();
    let package = EncryptedPackage::new(sealed, FileMetadata::new("a.txt", "text/plain", 10));

    let url = build(
        "https://share.example/app?x=1",
        &serialize_package(&package).unwrap(),
        &to_url_safe_text(keys.export(&key).as_slice()),
    );
    assert!(url.starts_with("https://share.example/app#d="));

    let tokens = parse(fragment_of(&url)).unwrap();
    let parsed = deserialize_package(&tokens.package).unwrap();
    let key_bytes = from_url_safe_text(&tokens.key).unwrap();
    let receiver_key = keys.import(&key_bytes).unwrap();

    let recovered = cipher
        .decrypt(&parsed.nonce, &parsed.ciphertext, &receiver_key)
        .unwrap();
    assert_eq!(recovered, plaintext);
    assert_eq!(parsed.metadata, FileMetadata::new("a.txt", "text/plain", 10));
}

#[test]
fn key_token_is_43_characters() {
    let key = KeyManager::system().generate().unwrap();
    let token = to_url_safe_text(KeyManager::system().export(&key).as_slice());
    assert_eq!(token.len(), 43);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn codec_roundtrips(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let text = to_url_safe_text(&data);
            prop_assert!(!text.contains('=') && !text.contains('+') && !text.contains('/'));
            prop_assert_eq!(from_url_safe_text(&text).unwrap(), data);
        }

        #[test]
        fn link_parse_roundtrips(
            pkg in proptest::collection::vec(any::<u8>(), 1..256),
            key in proptest::collection::vec(any::<u8>(), 32..=32),
        ) {
            let pkg_token = to_url_safe_text(&pkg);
            let key_token = to_url_safe_text(&key);
            let url = build("https://example.com/p", &pkg_token, &key_token);

            let tokens = parse(fragment_of(&url)).unwrap();
            prop_assert_eq!(from_url_safe_text(&tokens.package).unwrap(), pkg);
            prop_assert_eq!(from_url_safe_text(&tokens.key).unwrap(), key);
        }

        #[test]
        fn fragment_without_key_marker_is_ignored(value in "[A-Za-z0-9_-]{1,64}") {
            let fragment = format!("#d={}", value.replace('k', "x"));
            prop_assert!(parse(&fragment).is_none());
        }

        #[test]
        fn markers_in_either_order_are_found(
            pkg in "[A-Za-z0-9_-]{4,64}",
            key in "[A-Za-z0-9_-]{4,64}",
            prefix in "[a-z]{1,8}",
            key_first in any::<bool>(),
        ) {
            prop_assume!(prefix != "d" && prefix != "k");

            let fragment = if key_first {
                format!("#{prefix}=1&k={key}&d={pkg}&tail")
            } else {
                format!("#{prefix}=1&d={pkg}&k={key}&tail")
            };

            let tokens = parse(&fragment).unwrap();
            prop_assert_eq!(tokens.package.trim_end_matches('='), pkg.as_str());
            prop_assert_eq!(tokens.key.trim_end_matches('='), key.as_str());
        }

        #[test]
        fn package_roundtrips(
            nonce in proptest::array::uniform12(any::<u8>()),
            ciphertext in proptest::collection::vec(any::<u8>(), 0..1024),
            name in "\\PC{0,40}",
            mime in "[a-z]{1,10}/[a-z0-9.+-]{1,20}",
            size in any::<u64>(),
        ) {
            let package = EncryptedPackage {
                nonce,
                ciphertext,
                metadata: FileMetadata::new(name, mime, size),
            };
            let token = serialize_package(&package).unwrap();
            prop_assert_eq!(deserialize_package(&token).unwrap(), package);
        }
    }
}
