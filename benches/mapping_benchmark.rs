use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use music_plugins_rs::plugins::qq::{models, sheet_detail_page};

/// 生成一个含有 `count` 首歌曲的歌单详情响应。
fn playlist_json(count: usize) -> String {
    let tracks: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": 97773 + i,
                "mid": format!("0039MnYb0qx{i:04}"),
                "name": format!("歌曲 {i}"),
                "ar": [{ "name": "周杰伦" }, { "name": "阿信" }],
                "al": { "id": 8220, "mid": "000MkMni19ClKG", "name": "叶惠美" },
                "dt": 269000
            })
        })
        .collect();

    serde_json::json!({
        "code": 0,
        "data": {
            "id": 8223335694_u64,
            "name": "华语经典",
            "creator": { "nickname": "小蓝背心", "userId": 12345678 },
            "playCount": 1523000,
            "trackCount": count,
            "tracks": tracks
        }
    })
    .to_string()
}

fn bench_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("QQ Playlist Mapping");

    for count in [20_usize, 1000] {
        let body = playlist_json(count);
        group.bench_function(format!("{count} tracks"), |b| {
            b.iter(|| {
                let response: models::ApiResponse<models::PlaylistDetail> =
                    serde_json::from_str(black_box(&body)).unwrap();
                let _ = sheet_detail_page(response.data, 1, count as u32);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_mapping);
criterion_main!(benches);
