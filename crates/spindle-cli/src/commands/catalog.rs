use anyhow::{Context as _, Result};
use spindle_catalog::{release_to_patch, ReleaseDetails, SearchResponse, SearchType};

use super::{explain, Context};

pub async fn search(
    ctx: &Context,
    query: &str,
    kind: Option<SearchType>,
    page: u32,
    per_page: u32,
) -> Result<()> {
    let response = ctx
        .catalog()?
        .search(query, kind, page, per_page)
        .await
        .map_err(explain)?;
    print_results(&response);
    Ok(())
}

pub async fn search_barcode(ctx: &Context, barcode: &str) -> Result<()> {
    let response = ctx
        .catalog()?
        .search_by_barcode(barcode)
        .await
        .map_err(explain)?;
    print_results(&response);
    Ok(())
}

pub async fn search_catno(ctx: &Context, catno: &str, page: u32) -> Result<()> {
    let response = ctx
        .catalog()?
        .search_by_catalog_number(catno, page)
        .await
        .map_err(explain)?;
    print_results(&response);
    Ok(())
}

pub async fn show_release(ctx: &Context, id: u64) -> Result<()> {
    let release = ctx.catalog()?.get_release(id).await.map_err(explain)?;
    print_release(&release);
    println!("\nAdd it to your collection with `spindle import {}`", release.id);
    Ok(())
}

pub async fn show_master(ctx: &Context, id: u64) -> Result<()> {
    let master = ctx
        .catalog()?
        .get_master_release(id)
        .await
        .map_err(explain)?;
    println!("{}", serde_json::to_string_pretty(&master)?);
    Ok(())
}

/// Fetch a release, map it onto a record, and save it.
pub async fn import_release(ctx: &Context, id: u64) -> Result<()> {
    let release = ctx.catalog()?.get_release(id).await.map_err(explain)?;
    let patch = release_to_patch(&release);

    let record = ctx
        .records()
        .create_record(patch)
        .await
        .context("Failed to save record")?;

    log::info!("Imported Discogs release {} as {}", release.id, record.id);
    println!("✓ Added {} to your collection as {}", record.display_title(), record.id);
    Ok(())
}

fn print_results(response: &SearchResponse) {
    let pagination = &response.pagination;

    if response.results.is_empty() {
        println!("No results.");
        return;
    }

    println!();
    for result in &response.results {
        let mut details = Vec::new();
        if let Some(year) = result.year.as_deref().filter(|y| !y.is_empty()) {
            details.push(year.to_string());
        }
        if let Some(country) = &result.country {
            details.push(country.clone());
        }
        if !result.format.is_empty() {
            details.push(result.format.join(", "));
        }
        if let Some(catno) = &result.catno {
            details.push(catno.clone());
        }

        let kind = if result.kind == SearchType::Release {
            String::new()
        } else {
            format!("{} ", result.kind)
        };
        println!("  [{kind}{}] {}", result.id, result.title);
        if !details.is_empty() {
            println!("      {}", details.join(" · "));
        }
    }

    println!(
        "\nPage {} of {} ({} results)",
        pagination.page, pagination.pages, pagination.items
    );
    if pagination.has_next() {
        println!("More with --page {}", pagination.page + 1);
    }
}

fn print_release(release: &ReleaseDetails) {
    let artists: Vec<&str> = release.artists.iter().map(|a| a.name.as_str()).collect();

    println!("\n💿 {} - {}\n", artists.join(", "), release.title);
    if let Some(year) = release.year.filter(|y| *y > 0) {
        println!("  Year:     {}", year);
    }
    if let Some(country) = &release.country {
        println!("  Country:  {}", country);
    }
    for label in &release.labels {
        println!("  Label:    {} - {}", label.name, label.catno);
    }
    for format in &release.formats {
        if format.descriptions.is_empty() {
            println!("  Format:   {} × {}", format.qty, format.name);
        } else {
            println!(
                "  Format:   {} × {} ({})",
                format.qty,
                format.name,
                format.descriptions.join(", ")
            );
        }
    }
    if !release.genres.is_empty() {
        println!("  Genre:    {}", release.genres.join(", "));
    }
    if !release.styles.is_empty() {
        println!("  Style:    {}", release.styles.join(", "));
    }
    if !release.tracklist.is_empty() {
        println!("\n  Tracklist:");
        for track in &release.tracklist {
            println!("    {:<4} {} {}", track.position, track.title, track.duration);
        }
    }
    if !release.identifiers.is_empty() {
        println!("\n  Identifiers:");
        for identifier in &release.identifiers {
            match &identifier.description {
                Some(desc) => println!("    {} ({}): {}", identifier.kind, desc, identifier.value),
                None => println!("    {}: {}", identifier.kind, identifier.value),
            }
        }
    }
    if let Some(notes) = &release.notes {
        println!("\n  Notes:\n    {}", notes.replace('\n', "\n    "));
    }
    if let Some(uri) = &release.uri {
        println!("\n  {}", uri);
    }
}
