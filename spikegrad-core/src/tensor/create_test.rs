use super::*;
use crate::tensor::Tensor;

#[test]
fn test_zeros_like() {
    let tensor = Tensor::new(vec![1.0f32, 2.0, 3.0], vec![1, 3]).unwrap();
    let zeros_t = zeros_like(&tensor).unwrap();
    assert_eq!(zeros_t.shape(), tensor.shape());
    assert_eq!(zeros_t.numel(), tensor.numel());
    assert!(zeros_t.data().iter().all(|&x| x == 0.0));
}

#[test]
fn test_ones_like() {
    let tensor = Tensor::new(vec![5.0f32, -2.0], vec![2, 1]).unwrap();
    let ones_t = ones_like(&tensor).unwrap();
    assert_eq!(ones_t.shape(), vec![2, 1]);
    assert!(ones_t.data().iter().all(|&x| x == 1.0));
}

#[test]
fn test_full() {
    let shape = vec![3, 1, 2];
    let t = full(&shape, 42.5).unwrap();
    assert_eq!(t.shape(), shape);
    assert_eq!(t.numel(), 6);
    assert!(t.data().iter().all(|&x| x == 42.5));
}

#[test]
fn test_zeros_scalar_shape() {
    let t = zeros(&[]).unwrap();
    assert_eq!(t.numel(), 1);
    assert_eq!(t.item().unwrap(), 0.0);
}

#[test]
fn test_new_rejects_bad_length() {
    let err = Tensor::new(vec![1.0, 2.0, 3.0], vec![2, 2]).unwrap_err();
    assert_eq!(
        err,
        crate::error::SpikeGradError::TensorCreationError {
            data_len: 3,
            shape: vec![2, 2]
        }
    );
}

#[test]
fn test_rand() {
    let t = rand(&[4, 5]).unwrap();
    assert_eq!(t.shape(), vec![4, 5]);
    assert!(t.data().iter().all(|&x| (0.0..1.0).contains(&x)));
}

#[test]
fn test_randn_seeded_is_reproducible() {
    let a = randn_seeded(&[16], 7).unwrap();
    let b = randn_seeded(&[16], 7).unwrap();
    let c = randn_seeded(&[16], 8).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}
