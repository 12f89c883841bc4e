//! Construction of the configured location provider.

use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::debug;

use locbase_core::{FixedProvider, SharedProvider};

use crate::cli::ProviderKind;
use crate::config::ProviderSelection;

/// Build the provider described by `selection`.
pub fn build_provider(selection: &ProviderSelection) -> Result<SharedProvider> {
    debug!(kind = %selection.kind, "Building location provider");

    match selection.kind {
        ProviderKind::Fixed => {
            let Some(coordinate) = selection.fixed else {
                bail!(
                    "The fixed provider needs a coordinate.\n\
                     Pass --at LAT,LON or run 'locbase config set fixed-at LAT,LON'."
                );
            };
            Ok(Arc::new(FixedProvider::new(coordinate)))
        }
        ProviderKind::Geoclue => geoclue(selection),
    }
}

#[cfg(target_os = "linux")]
fn geoclue(selection: &ProviderSelection) -> Result<SharedProvider> {
    use locbase_core::{GeoClueOptions, GeoClueProvider};

    let options = GeoClueOptions {
        desktop_id: selection.desktop_id.clone(),
        ..GeoClueOptions::default()
    };
    Ok(Arc::new(GeoClueProvider::new(options)))
}

#[cfg(not(target_os = "linux"))]
fn geoclue(_selection: &ProviderSelection) -> Result<SharedProvider> {
    bail!(
        "GeoClue is only available on Linux.\n\
         Use --provider fixed --at LAT,LON instead."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use locbase_core::LocationProvider;
    use locbase_types::Coordinate;

    fn selection(kind: ProviderKind, fixed: Option<Coordinate>) -> ProviderSelection {
        ProviderSelection {
            kind,
            fixed,
            desktop_id: "locbase".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fixed_provider_reports_coordinate() {
        let provider =
            build_provider(&selection(ProviderKind::Fixed, Some(Coordinate::new(1.0, 2.0))))
                .unwrap();
        assert_eq!(provider.name(), "fixed");
        assert!(provider.request_permission().await.unwrap().is_granted());
        assert_eq!(
            provider.current_location().await.unwrap(),
            Coordinate::new(1.0, 2.0)
        );
    }

    #[test]
    fn test_fixed_provider_requires_coordinate() {
        let Err(err) = build_provider(&selection(ProviderKind::Fixed, None)) else {
            panic!("fixed provider without a coordinate should fail");
        };
        assert!(err.to_string().contains("--at"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_geoclue_provider_is_lazy() {
        // Building does not touch the system bus.
        let provider = build_provider(&selection(ProviderKind::Geoclue, None)).unwrap();
        assert_eq!(provider.name(), "geoclue");
    }
}
