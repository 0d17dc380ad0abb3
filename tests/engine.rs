//! Crack-job orchestration tests

use crackbox::{
    CipherKey, CipherType, CrackEngine, CrackJob, CrackTarget, EngineConfig, ErrorKind, JobState,
    JobUpdate, ModernScheme, ProductOptions, leading,
};

const MESSAGE: &str =
    "WE WILL MEET AT THE OLD BRIDGE TONIGHT AND THEN SEND THE SECRET MESSAGE TO THE KING";

#[test]
fn test_newer_job_supersedes_running_job() {
    let mut engine = CrackEngine::default();

    // A long double-transposition search that will still be running.
    let slow = "QWERTYUIOPASDFGHJKLZXCVBNM".repeat(20);
    let first = engine
        .submit(CrackJob::new(CipherType::DoubleTransposition, slow))
        .unwrap();

    let ciphertext = CipherKey::Additive(9).encode(MESSAGE).unwrap();
    let second = engine
        .submit(CrackJob::new(CipherType::Additive, ciphertext))
        .unwrap();
    assert!(second > first);

    let results = engine.wait(|_| {}).unwrap();
    assert_eq!(results.len(), 26);
    assert!(
        results
            .iter()
            .all(|r| matches!(r.key, Some(CipherKey::Additive(_))))
    );
    assert_eq!(results[0].plaintext, MESSAGE);
    assert_eq!(results[0].key, Some(CipherKey::Additive(9)));

    // Nothing from the first job surfaces afterwards.
    std::thread::sleep(std::time::Duration::from_millis(50));
    assert!(engine.poll().is_none());
    assert_eq!(engine.state(), JobState::Idle);
}

#[test]
fn test_superseding_a_finished_job_discards_its_outcome() {
    let mut engine = CrackEngine::default();
    engine
        .submit(CrackJob::new(CipherType::Vernam, "ABCDEF"))
        .unwrap();
    while !matches!(engine.poll(), Some(JobUpdate::Finished(_))) {
        std::thread::yield_now();
    }
    assert_eq!(engine.state(), JobState::Complete);

    engine
        .submit(CrackJob::new(CipherType::Multiplicative, "XCZZU"))
        .unwrap();
    let results = engine.wait(|_| {}).unwrap();
    assert_eq!(results.len(), 12);
    assert!(results.iter().all(|r| !r.is_sentinel()));
}

#[test]
fn test_ranked_results_are_sorted_and_capped() {
    let config = EngineConfig::default().with_max_results(50);
    let mut engine = CrackEngine::new(config);
    let ciphertext = CipherKey::Affine { a: 11, b: 4 }.encode(MESSAGE).unwrap();
    engine
        .submit(CrackJob::new(CipherType::Affine, ciphertext))
        .unwrap();
    let results = engine.wait(|_| {}).unwrap();

    assert_eq!(results.len(), 50);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(results[0].key, Some(CipherKey::Affine { a: 11, b: 4 }));
    assert_eq!(results[0].plaintext, MESSAGE);
    assert_eq!(leading(&results, 5).len(), 5);
    for r in &results {
        assert_eq!(r.confidence, (r.score * 100.0).round() as u8);
    }
}

#[test]
fn test_product_job() {
    let key = CipherKey::product(CipherKey::Additive(4), CipherKey::RailFence(3)).unwrap();
    let ciphertext = key.encode(MESSAGE).unwrap();
    let mut engine = CrackEngine::default();
    engine
        .submit(
            CrackJob::new(CipherType::Product, ciphertext)
                .with_options(ProductOptions::new(CipherType::Additive, CipherType::RailFence)),
        )
        .unwrap();
    let results = engine.wait(|_| {}).unwrap();
    assert_eq!(results[0].key, Some(key));
    assert_eq!(results[0].plaintext, MESSAGE.replace(' ', ""));
}

#[test]
fn test_failure_is_reported_once() {
    let mut engine = CrackEngine::default();
    engine
        .submit(CrackJob::new(CipherType::Additive, "1234 !!"))
        .unwrap();
    let err = engine.wait(|_| {}).expect_err("no letters");
    assert_eq!(err.kind, Some(ErrorKind::InvalidInput));
    assert_eq!(engine.state(), JobState::Idle);
    assert!(engine.take_outcome().is_none());
}

#[test]
fn test_untractable_targets_yield_sentinel() {
    let mut engine = CrackEngine::default();
    for target in [
        CrackTarget::Cipher(CipherType::Monoalphabetic),
        CrackTarget::Modern(ModernScheme::Rsa),
    ] {
        engine.submit(CrackJob::new(target, "ZQXJ")).unwrap();
        let results = engine.wait(|_| {}).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_sentinel());
        assert_eq!(results[0].confidence, 0);
    }
}
