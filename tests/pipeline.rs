use gpviz::chart::{KernelType, PlotConfig, Record};
use gpviz::prelude::*;
use nalgebra::DVector;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

#[test]
fn default_demo_produces_sorted_records() {
    let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
    let cfg = PlotConfig::default();

    let gp = cfg.fit(&mut rng).unwrap();
    let records = gp.to_records();

    assert_eq!(records.len(), cfg.n_train + cfg.n_test);
    assert_eq!(records.iter().filter(|r| r.is_train()).count(), cfg.n_train);
    assert!(records.windows(2).all(|w| w[0].x() <= w[1].x()));

    for record in &records {
        if let Record::Test { samples, mean, .. } = record {
            assert_eq!(samples.len(), cfg.n_paths);
            assert!(mean.is_finite());
        }
    }
}

#[test]
fn banner_records_fit_in_the_box() {
    let mut rng = Xoshiro256Plus::seed_from_u64(42);
    let cfg = PlotConfig::default()
        .with_kernel_type(KernelType::SquaredExponential)
        .with_sizes(10, 50);

    let transform = cfg.banner_transform();
    let records = cfg.records(&transform, &mut rng).unwrap();

    let half = cfg.box_width / 2.0;
    assert!(records.iter().all(|r| r.x().abs() <= half + 1E-9));
    assert!(records.iter().all(|r| r.truth().is_some()));
}

#[test]
fn repeated_predictions_share_one_posterior() {
    let mut rng = Xoshiro256Plus::seed_from_u64(0xABCD);
    let x_train = DVector::from_column_slice(&[-3.0, -1.0, 0.5, 2.5]);
    let y_train = x_train.map(f64::sin);
    let x_test = DVector::from_column_slice(&[-2.0, 0.0, 1.5, 3.0]);

    let mut gp = GaussianProcess::fit(
        SquaredExponentialKernel::default(),
        x_train,
        y_train,
        x_test,
        NoiseModel::new(0.3, 1E-8).unwrap(),
    )
    .unwrap();

    let mean = gp.posterior().mean().clone();
    let lower = gp.posterior().lower().clone();
    let upper = gp.posterior().upper().clone();

    let a = gp.predict(&mut rng).clone();
    let b = gp.predict(&mut rng).clone();

    assert_ne!(a, b);
    assert_eq!(gp.posterior().mean(), &mean);
    assert_eq!(gp.posterior().lower(), &lower);
    assert_eq!(gp.posterior().upper(), &upper);
}

#[test]
fn posterior_factor_reconstructs_covariance() {
    let x_train = DVector::from_column_slice(&[-2.0, 0.0, 2.0]);
    let y_train = x_train.map(f64::sin);
    let x_test = DVector::from_column_slice(&[-1.0, 1.0, 4.0]);

    let gp = GaussianProcess::fit(
        PeriodicKernel::new(1.0, 1.0, std::f64::consts::TAU).unwrap(),
        x_train,
        y_train,
        x_test,
        NoiseModel::new(0.3, 1E-8).unwrap(),
    )
    .unwrap();

    let post = gp.posterior();
    let l = post.cholesky();
    assert!((l * l.transpose()).relative_eq(post.cov(), 1E-9, 1E-9));
    assert!(post.cov().diagonal().iter().all(|&v| v >= 0.0));
}
