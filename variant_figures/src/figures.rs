//! Load, transform and render each figure group. Groups share nothing but
//! the input files; each reloads what it needs.

use tracing::info;

use crate::config::*;
use crate::data_handling::centromeres::Centromeres;
use crate::data_handling::chromosome_map::ChromosomeMap;
use crate::data_handling::region_variants::RegionVariants;
use crate::data_handling::sv_tables::{SvLengths, SvWindows};
use crate::data_handling::window_counts::WindowCounts;
use crate::helper_functions::natural_sorted_unique;
use crate::models::columns::{CHROMOSOME, VARIANT_CLASS};
use crate::models::{Dataset, Result};
use crate::plotting::centromere_facets::plot_var_per_chr;
use crate::plotting::chromosome_scatter::{plot_var_chr, TITLE_ALL, TITLE_HETEROZYGOUS, TITLE_HOMOZYGOUS};
use crate::plotting::fraction_bar::plot_fraction;
use crate::plotting::sv_length_bars::plot_sv_chart;
use crate::plotting::sv_trend_facets::plot_trend_per_chr;
use crate::processing::centromere::{centromere_relative_density, sv_trend_density};
use crate::processing::density::chromosome_density;
use crate::processing::region_fraction::count_by_region;

/// Figure 1A, 1B and supplementary S1A/S1B.
pub fn plot_figure1(config: &PipelineConfig) -> Result<()> {
    info!("Figure 1A: variant fraction per region");
    let variants = RegionVariants {
        path: config.data_file(REGION_VARIANTS_FILE),
    }
    .load()?;
    let region_counts = count_by_region(&variants)?;
    let class_order = natural_sorted_unique(&region_counts, VARIANT_CLASS, "region counts")?;
    plot_fraction(&region_counts, &class_order, "Figure1A", config.output_dir())?;

    info!("Figure 1B: variant density per chromosome");
    let chr_map = ChromosomeMap {
        path: config.data_file(CHROMOSOME_MAP_FILE),
    }
    .load()?;
    let windows = WindowCounts {
        path: config.data_file(WINDOW_10KB_FILE),
    }
    .load()?;
    let density = chromosome_density(&windows, &chr_map)?;
    // S1A/S1B reuse this order
    let chromosome_order = natural_sorted_unique(&density, CHROMOSOME, "chromosome density")?;
    plot_var_chr(&density, &chromosome_order, "Figure1B", TITLE_ALL, config.output_dir())?;

    info!("Figure S1A: homozygous variant density");
    let homozygous = WindowCounts {
        path: config.data_file(WINDOW_10KB_HOMOZYGOUS_FILE),
    }
    .load()?;
    plot_var_chr(
        &chromosome_density(&homozygous, &chr_map)?,
        &chromosome_order,
        "Figure_S1A",
        TITLE_HOMOZYGOUS,
        config.output_dir(),
    )?;

    info!("Figure S1B: heterozygous variant density");
    let heterozygous = WindowCounts {
        path: config.data_file(WINDOW_10KB_HETEROZYGOUS_FILE),
    }
    .load()?;
    plot_var_chr(
        &chromosome_density(&heterozygous, &chr_map)?,
        &chromosome_order,
        "Figure_S1B",
        TITLE_HETEROZYGOUS,
        config.output_dir(),
    )?;

    Ok(())
}

/// Figure 2: 500 kb density relative to the centromere.
pub fn plot_figure2(config: &PipelineConfig) -> Result<()> {
    info!("Figure 2: variant distribution towards the centromere");
    let chr_map = ChromosomeMap {
        path: config.data_file(CHROMOSOME_MAP_FILE),
    }
    .load()?;
    let windows = WindowCounts {
        path: config.data_file(WINDOW_500KB_FILE),
    }
    .load()?;
    let centromeres = Centromeres {
        path: config.data_file(CENTROMERE_FILE),
    }
    .load()?;

    let processed = centromere_relative_density(&windows, &chr_map, &centromeres)?;
    let chromosome_order = natural_sorted_unique(&processed, CHROMOSOME, "centromere-relative density")?;
    plot_var_per_chr(&processed, &chromosome_order, "Figure2", config.output_dir())?;
    Ok(())
}

/// Figure 3B-C: SV length summaries.
pub fn plot_figure3(config: &PipelineConfig) -> Result<()> {
    info!("Figure 3B-C: SV median and total length");
    let lengths = SvLengths {
        path: config.data_file(SV_LENGTH_FILE),
    }
    .load()?;
    plot_sv_chart(&lengths, "Figure3BC", config.output_dir())?;
    Ok(())
}

/// Figure 4: SV trends towards the centromere.
pub fn plot_figure4(config: &PipelineConfig) -> Result<()> {
    info!("Figure 4: SV distribution towards the centromere");
    let centromeres = Centromeres {
        path: config.data_file(CENTROMERE_FILE),
    }
    .load()?;
    let sv_windows = SvWindows {
        path: config.data_file(SV_WINDOW_FILE),
    }
    .load()?;

    let processed = sv_trend_density(&sv_windows, &centromeres)?;
    plot_trend_per_chr(&processed, "Figure4", config.output_dir())?;
    Ok(())
}
