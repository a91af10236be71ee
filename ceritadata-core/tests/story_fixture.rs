//! Integration tests parsing backend-shaped story payloads.

use ceritadata_core::{ChartData, ChartType, Story, StoryStatus};

const LISTING_FIXTURE: &str = r##"[
    {
        "id": 3,
        "slug": "perbandingan-tpt-antar-provinsi",
        "title": "Perbandingan TPT Antar Provinsi",
        "description": "Membandingkan tingkat pengangguran terbuka di berbagai provinsi.",
        "story_content": "<h3>Perbandingan</h3><p>...</p>",
        "chart_type": "column",
        "chart_data": {
            "labels": ["Jawa Barat", "Banten", "DKI Jakarta"],
            "datasets": [{
                "label": "TPT (%)",
                "data": [7.4, 7.9, 6.5],
                "backgroundColor": "rgba(59, 130, 246, 0.8)",
                "borderColor": "#3b82f6",
                "borderWidth": 2,
                "fill": false
            }]
        },
        "status": "draft",
        "created_at": "2024-01-05T11:20:00Z",
        "updated_at": "2024-01-07T13:10:00Z"
    }
]"##;

#[test]
fn listing_fixture_parses() {
    let stories: Vec<Story> = serde_json::from_str(LISTING_FIXTURE).unwrap();
    assert_eq!(stories.len(), 1);

    let story = &stories[0];
    assert_eq!(story.chart_type, ChartType::Column);
    assert_eq!(story.status, StoryStatus::Draft);

    let chart = ChartData::from_payload(story.chart_data.as_ref().unwrap()).unwrap();
    assert_eq!(chart.labels.len(), 3);
    assert_eq!(chart.primary().unwrap().data, vec![7.4, 7.9, 6.5]);
    assert_eq!(chart.primary().unwrap().label, "TPT (%)");
}
