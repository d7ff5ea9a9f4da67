use super::*;
use crate::error::SpikeGradError;
use crate::utils::testing::{check_tensor_near, create_test_tensor};

#[test]
fn test_unsqueeze() {
    let t = create_test_tensor(vec![1.0, 2.0], vec![2]);
    assert_eq!(unsqueeze(&t, 1).unwrap().shape(), vec![2, 1]);
    assert_eq!(unsqueeze(&t, 0).unwrap().shape(), vec![1, 2]);
    assert!(unsqueeze(&t, 2).is_err());
}

#[test]
fn test_expand_column() {
    let t = create_test_tensor(vec![1.0, 2.0], vec![2, 1]);
    let e = expand(&t, &[2, 3]).unwrap();
    check_tensor_near(&e, &[2, 3], &[1.0, 1.0, 1.0, 2.0, 2.0, 2.0], 0.0);
}

#[test]
fn test_expand_rejects_shrink() {
    let t = create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]);
    assert!(matches!(
        expand(&t, &[2, 2]),
        Err(SpikeGradError::BroadcastError { .. })
    ));
}

#[test]
fn test_tile_batch_target_over_time() {
    let predicted = create_test_tensor(vec![1.0, 0.0], vec![1, 2]);
    let target = create_test_tensor(vec![0.0], vec![1]);
    let tiled = tile_batch_target(&target, &predicted).unwrap();
    check_tensor_near(&tiled, &[1, 2], &[0.0, 0.0], 0.0);
}

#[test]
fn test_tile_batch_target_rank3() {
    let predicted = create_test_tensor(vec![0.0; 8], vec![2, 2, 2]);
    let target = create_test_tensor(vec![3.0, 5.0], vec![2]);
    let tiled = tile_batch_target(&target, &predicted).unwrap();
    check_tensor_near(
        &tiled,
        &[2, 2, 2],
        &[3.0, 3.0, 3.0, 3.0, 5.0, 5.0, 5.0, 5.0],
        0.0,
    );
}

#[test]
fn test_tile_batch_target_batch_mismatch() {
    let predicted = create_test_tensor(vec![0.0; 6], vec![3, 2]);
    let target = create_test_tensor(vec![1.0, 2.0], vec![2]);
    assert!(matches!(
        tile_batch_target(&target, &predicted),
        Err(SpikeGradError::ShapeMismatch { .. })
    ));
}
