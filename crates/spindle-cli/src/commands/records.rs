use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use spindle_core::ocr::extract_label_data;
use spindle_core::{RecordId, RecordPatch, VinylRecord};

use super::image::resolve_image;
use super::Context;

/// Record fields accepted by `add`, `edit` and `scan`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RecordFields {
    /// Artist name
    #[arg(long)]
    pub artist: Option<String>,

    /// Album title
    #[arg(long)]
    pub album: Option<String>,

    /// Catalog number printed on the sleeve or label
    #[arg(long)]
    pub serial: Option<String>,

    /// Matrix / runout etching
    #[arg(long)]
    pub matrix: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub country: Option<String>,

    /// Genres (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub genre: Option<Vec<String>>,

    /// Styles (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub style: Option<Vec<String>>,

    #[arg(long)]
    pub label: Option<String>,

    /// Format summary, e.g. "1 × Vinyl (LP, Album)"
    #[arg(long)]
    pub format: Option<String>,
}

impl RecordFields {
    pub fn into_patch(self) -> RecordPatch {
        let trim_list = |values: Vec<String>| -> Vec<String> {
            values
                .into_iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect()
        };

        RecordPatch {
            artist_name: self.artist,
            album_name: self.album,
            serial_number: self.serial,
            matrix_runout: self.matrix,
            year: self.year,
            country: self.country,
            genre: self.genre.map(trim_list),
            style: self.style.map(trim_list),
            label: self.label,
            format: self.format,
            ..RecordPatch::default()
        }
    }
}

pub async fn list_records(ctx: &Context) -> Result<()> {
    let records = ctx.records().list_records().await?;

    if records.is_empty() {
        println!("Your collection is empty.");
        println!("\nAdd a record with `spindle add` or `spindle import <release-id>`.");
        return Ok(());
    }

    println!("\n💿 Collection ({} records)\n", records.len());
    for record in &records {
        println!("  {}", summary_line(record));
    }

    Ok(())
}

pub async fn show_record(ctx: &Context, id: String) -> Result<()> {
    let record = ctx.records().get_record(&RecordId::from(id)).await?;
    print_record(&record);
    Ok(())
}

pub async fn add_record(ctx: &Context, fields: RecordFields, image: Option<String>) -> Result<()> {
    let store = ctx.records();
    let mut patch = fields.into_patch();
    if let Some(image) = image {
        patch.image_url = Some(store.upload_image(resolve_image(&image)?).await?);
    }

    let record = store
        .create_record(patch)
        .await
        .context("Failed to save record")?;

    println!("✓ Saved {} as {}", record.display_title(), record.id);
    Ok(())
}

pub async fn edit_record(
    ctx: &Context,
    id: String,
    fields: RecordFields,
    image: Option<String>,
) -> Result<()> {
    let store = ctx.records();
    let mut patch = fields.into_patch();
    if let Some(image) = image {
        patch.image_url = Some(store.upload_image(resolve_image(&image)?).await?);
    }

    if patch.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }

    let record = store.update_record(&RecordId::from(id), patch).await?;
    println!("✓ Updated {}", record.id);
    print_record(&record);
    Ok(())
}

pub async fn delete_record(ctx: &Context, id: String) -> Result<()> {
    ctx.records().delete_record(&RecordId::from(id.clone())).await?;
    println!("✓ Deleted {}", id);
    Ok(())
}

pub async fn scan_label(ctx: &Context, image: String, fields: RecordFields) -> Result<()> {
    let store = ctx.records();
    let image = store.upload_image(resolve_image(&image)?).await?;

    println!("Reading label...");
    let mut patch = match extract_label_data(&image).await {
        Some(data) => {
            let mut patch = RecordPatch::from(data);
            let typed = fields.into_patch();
            // Whatever was typed on the command line beats extracted text.
            merge_patches(&mut patch, typed);
            patch
        }
        None => {
            println!("No text detected on the label.");
            fields.into_patch()
        }
    };
    patch.image_url = Some(image);

    let record = store
        .create_record(patch)
        .await
        .context("Failed to save record")?;
    println!("✓ Saved {} as {}", record.display_title(), record.id);
    if record.data.artist_name.is_empty() && record.data.album_name.is_empty() {
        println!("  Fill in the details with `spindle edit {}`", record.id);
    }
    Ok(())
}

fn merge_patches(base: &mut RecordPatch, over: RecordPatch) {
    macro_rules! take {
        ($($field:ident),*) => {
            $(if over.$field.is_some() { base.$field = over.$field; })*
        };
    }
    take!(
        artist_name,
        album_name,
        serial_number,
        matrix_runout,
        year,
        country,
        genre,
        style,
        label,
        format,
        discogs_id,
        discogs_url,
        image_url
    );
}

fn summary_line(record: &VinylRecord) -> String {
    let mut parts = vec![record.id.to_string(), record.display_title()];
    if !record.data.serial_number.is_empty() {
        parts.push(format!("[{}]", record.data.serial_number));
    }
    if let Some(year) = record.data.year {
        parts.push(format!("({year})"));
    }
    parts.join("  ")
}

fn print_record(record: &VinylRecord) {
    let data = &record.data;
    let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

    println!("\n💿 {}\n", record.display_title());
    println!("  Id:            {}", record.id);
    println!("  Artist:        {}", or_dash(&data.artist_name));
    println!("  Album:         {}", or_dash(&data.album_name));
    println!("  Catalog #:     {}", or_dash(&data.serial_number));
    println!("  Matrix/Runout: {}", or_dash(&data.matrix_runout));
    if let Some(year) = data.year {
        println!("  Year:          {}", year);
    }
    if let Some(country) = &data.country {
        println!("  Country:       {}", country);
    }
    if let Some(label) = &data.label {
        println!("  Label:         {}", label);
    }
    if let Some(format) = &data.format {
        println!("  Format:        {}", format);
    }
    if let Some(genre) = &data.genre {
        println!("  Genre:         {}", genre.join(", "));
    }
    if let Some(style) = &data.style {
        println!("  Style:         {}", style.join(", "));
    }
    if let Some(url) = &data.discogs_url {
        println!("  Discogs:       {}", url);
    }
    match &record.image_url {
        Some(url) if url.starts_with("data:") => {
            println!("  Image:         (embedded, {} bytes)", url.len());
        }
        Some(url) => println!("  Image:         {}", url),
        None => {}
    }
    println!("  Added:         {}", format_millis(record.created_at));
    println!("  Updated:       {}", format_millis(record.updated_at));
}

fn format_millis(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}
